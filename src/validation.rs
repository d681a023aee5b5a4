//! Feasibility checks for planning runs.
//!
//! Runs before the greedy loop so that problems which would otherwise
//! stall it forever are reported up front. Detects:
//! - Duplicate resource IDs
//! - Non-positive daily allowance
//! - Negative estimates
//! - Tasks no resource can perform
//! - Tasks whose every eligible estimate exceeds the daily allowance
//! - Circular dependencies in the active edge set (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::config::SchedulerConfig;
use crate::graph::{DependencyEdge, TaskGraph};
use crate::models::{format_hms, InstanceId, Resource};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two resources share the same ID.
    DuplicateId,
    /// The daily allowance is zero or negative.
    InvalidAllowance,
    /// An estimate is negative.
    InvalidDuration,
    /// No resource has both the task's tag and an estimate for it.
    NoEligibleResource,
    /// Every eligible resource needs more than one day for the task.
    ExceedsDailyAllowance,
    /// A declared dependency names a task outside its phase.
    InvalidDependency,
    /// The dependency graph contains a cycle.
    CyclicDependency,
    /// A freshly reset day could not place any task.
    NoProgress,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a planning run before it starts.
///
/// Checks:
/// 1. Positive daily allowance
/// 2. No duplicate resource IDs
/// 3. Every estimate is non-negative (estimates for resources outside
///    the pool are only logged)
/// 4. Every instance has an eligible resource (tag + estimate)
/// 5. At least one eligible estimate fits in a single day
/// 6. No circular dependencies among `edges`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_plan(
    graph: &TaskGraph,
    edges: &[DependencyEdge],
    resources: &[Resource],
    config: &SchedulerConfig,
) -> ValidationResult {
    let mut errors = Vec::new();
    let allowance = config.daily_allowance_ms;

    if allowance <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidAllowance,
            format!("Daily allowance must be positive, got {allowance} ms"),
        ));
    }

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
    }

    for inst in graph.instances() {
        let task = &inst.task;

        for (resource_id, &ms) in &task.estimated_ms {
            if ms < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDuration,
                    format!(
                        "Task '{}' of project {} has negative estimate {ms} ms for '{resource_id}'",
                        task.id, inst.project_id
                    ),
                ));
            }
            if !resource_ids.contains(resource_id.as_str()) {
                warn!(
                    task = %task.id,
                    project = inst.project_id,
                    resource = %resource_id,
                    "estimate names a resource outside the pool"
                );
            }
        }

        let eligible: Vec<i64> = resources
            .iter()
            .filter_map(|r| r.eligible_estimate(task))
            .collect();

        match eligible.iter().min() {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::NoEligibleResource,
                format!(
                    "Task '{}' of project {} has no resource with tag {} and an estimate",
                    task.id, inst.project_id, task.tag
                ),
            )),
            Some(&shortest) if allowance > 0 && shortest > allowance => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ExceedsDailyAllowance,
                    format!(
                        "Task '{}' of project {} needs at least {} but a day allows {}",
                        task.id,
                        inst.project_id,
                        format_hms(shortest),
                        format_hms(allowance)
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    if let Some(cycle_err) = detect_cycles(graph, edges) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the dependency graph using DFS.
///
/// Nodes are visited in instance order so the reported instance is
/// deterministic. The walk keeps its own stack; project chains can be
/// arbitrarily long.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (reaching a node
/// that is still on the DFS path), a cycle exists.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(graph: &TaskGraph, edges: &[DependencyEdge]) -> Option<ValidationError> {
    // Adjacency: dependee → dependers
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];
    for e in edges {
        let (from, to) = (e.dependee.index(), e.depender.index());
        if from < adj.len() && to < adj.len() {
            adj[from].push(to);
        }
    }

    let mut visited = vec![false; graph.len()];
    let mut in_stack = vec![false; graph.len()];

    for node in 0..graph.len() {
        if !visited[node] && has_cycle_from(node, &adj, &mut visited, &mut in_stack) {
            let label = graph
                .instance(InstanceId(node))
                .map(|i| format!("task '{}' of project {}", i.task.id, i.project_id))
                .unwrap_or_default();
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving instance {} ({label})", InstanceId(node)),
            ));
        }
    }

    None
}

fn has_cycle_from(
    root: usize,
    adj: &[Vec<usize>],
    visited: &mut [bool],
    in_stack: &mut [bool],
) -> bool {
    // (node, next neighbour to look at)
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    visited[root] = true;
    in_stack[root] = true;

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        match adj[node].get(cursor) {
            Some(&next) => {
                frame.1 += 1;
                if in_stack[next] {
                    return true; // Back edge → cycle
                }
                if !visited[next] {
                    visited[next] = true;
                    in_stack[next] = true;
                    stack.push((next, 0));
                }
            }
            None => {
                in_stack[node] = false;
                stack.pop();
            }
        }
    }

    false
}
