//! Dependency graph construction.
//!
//! Flattens projects into an arena of task instances and chains them with
//! "depends-on" edges.
//!
//! # Chain Rule
//!
//! Within a phase, the task at position i+1 depends on the task at
//! position i, so tasks complete in listed order. The first task of a
//! phase depends on the last task of the previous phase of the same
//! project. Every project therefore becomes one linear chain, and its
//! first task is immediately schedulable.
//!
//! Declared phase dependencies are resolved to instances and kept apart
//! in `declared_edges`; they only join the active edge set on request.

use tracing::info;

use crate::error::{Result, SchedulerError};
use crate::models::{InstanceId, Project, Task};
use crate::validation::{ValidationError, ValidationErrorKind};

/// One occurrence of a task inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInstance {
    /// Arena key.
    pub id: InstanceId,
    /// Project-local copy of the task template.
    pub task: Task,
    /// Owning project.
    pub project_id: u32,
    /// Owning phase.
    pub phase_id: u32,
}

/// `depender` cannot start until `dependee` has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    /// Waiting instance.
    pub depender: InstanceId,
    /// Instance that must be placed first.
    pub dependee: InstanceId,
}

impl DependencyEdge {
    /// Creates an edge: `depender` depends on `dependee`.
    pub fn new(depender: InstanceId, dependee: InstanceId) -> Self {
        Self { depender, dependee }
    }
}

/// Flat instance arena plus dependency edges.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    instances: Vec<TaskInstance>,
    edges: Vec<DependencyEdge>,
    declared_edges: Vec<DependencyEdge>,
}

impl TaskGraph {
    /// Builds the graph for projects in the given order.
    ///
    /// # Errors
    /// `SchedulerError::Configuration` if a declared phase dependency
    /// names a task that is not part of that phase.
    pub fn build(projects: &[Project]) -> Result<Self> {
        let mut graph = Self::default();
        let mut errors = Vec::new();

        for project in projects {
            let mut last_of_prev_phase: Option<InstanceId> = None;

            for phase in &project.phases {
                let first = graph.instances.len();

                for (pos, task) in phase.tasks.iter().enumerate() {
                    let id = InstanceId(first + pos);
                    graph.instances.push(TaskInstance {
                        id,
                        task: task.clone(),
                        project_id: project.id,
                        phase_id: phase.id,
                    });

                    if pos == 0 {
                        if let Some(prev) = last_of_prev_phase {
                            graph.edges.push(DependencyEdge::new(id, prev));
                        }
                    }
                    if pos + 1 < phase.tasks.len() {
                        graph
                            .edges
                            .push(DependencyEdge::new(InstanceId(first + pos + 1), id));
                    }
                }

                for dep in &phase.dependencies {
                    match (phase.position_of(&dep.depender), phase.position_of(&dep.dependee)) {
                        (Some(a), Some(b)) => graph.declared_edges.push(DependencyEdge::new(
                            InstanceId(first + a),
                            InstanceId(first + b),
                        )),
                        _ => errors.push(ValidationError::new(
                            ValidationErrorKind::InvalidDependency,
                            format!(
                                "Phase {} of project {} declares dependency {} -> {} on a task it does not contain",
                                phase.id, project.id, dep.depender, dep.dependee
                            ),
                        )),
                    }
                }

                if !phase.tasks.is_empty() {
                    last_of_prev_phase = Some(InstanceId(graph.instances.len() - 1));
                }
            }
        }

        if !errors.is_empty() {
            return Err(SchedulerError::Configuration(errors));
        }

        info!(
            projects = projects.len(),
            instances = graph.instances.len(),
            edges = graph.edges.len(),
            declared = graph.declared_edges.len(),
            "dependency graph built"
        );
        Ok(graph)
    }

    /// All instances in build order.
    pub fn instances(&self) -> &[TaskInstance] {
        &self.instances
    }

    /// Looks up an instance.
    pub fn instance(&self, id: InstanceId) -> Option<&TaskInstance> {
        self.instances.get(id.index())
    }

    /// Owning project of an instance.
    pub fn project_of(&self, id: InstanceId) -> Option<u32> {
        self.instance(id).map(|i| i.project_id)
    }

    /// Chain edges.
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Edges declared on phases, resolved to instances.
    pub fn declared_edges(&self) -> &[DependencyEdge] {
        &self.declared_edges
    }

    /// Edge set used by a scheduling run.
    pub fn active_edges(&self, include_declared: bool) -> Vec<DependencyEdge> {
        let mut edges = self.edges.clone();
        if include_declared {
            for edge in &self.declared_edges {
                if !edges.contains(edge) {
                    edges.push(*edge);
                }
            }
        }
        edges
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether there is nothing to schedule.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, Tag, TaskDependency};

    fn task(id: &str) -> Task {
        Task::new(id, Tag::WebDeveloper).with_estimate("R1", 1000)
    }

    fn phase(id: u32, ids: &[&str]) -> Phase {
        Phase::new(id).with_tasks(ids.iter().map(|t| task(t)))
    }

    fn edge(a: usize, b: usize) -> DependencyEdge {
        DependencyEdge::new(InstanceId(a), InstanceId(b))
    }

    #[test]
    fn test_chain_within_phase() {
        let projects = vec![Project::new(1).with_phase(phase(1, &["A", "B", "C"]))];
        let graph = TaskGraph::build(&projects).unwrap();

        assert_eq!(graph.len(), 3);
        // B depends on A, C depends on B
        assert_eq!(graph.edges(), &[edge(1, 0), edge(2, 1)]);
    }

    #[test]
    fn test_phases_chain_head_to_tail() {
        let projects = vec![Project::new(1)
            .with_phase(phase(1, &["A", "B"]))
            .with_phase(phase(2, &["C"]))
            .with_phase(phase(3, &["D", "E"]))];
        let graph = TaskGraph::build(&projects).unwrap();

        assert_eq!(
            graph.edges(),
            &[edge(1, 0), edge(2, 1), edge(3, 2), edge(4, 3)]
        );
    }

    #[test]
    fn test_projects_do_not_link() {
        let projects = vec![
            Project::new(1).with_phase(phase(1, &["A", "B"])),
            Project::new(2).with_phase(phase(1, &["A", "B"])),
        ];
        let graph = TaskGraph::build(&projects).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.edges(), &[edge(1, 0), edge(3, 2)]);
        assert_eq!(graph.project_of(InstanceId(0)), Some(1));
        assert_eq!(graph.project_of(InstanceId(2)), Some(2));
        assert_eq!(graph.project_of(InstanceId(9)), None);
    }

    #[test]
    fn test_same_id_distinct_instances() {
        let projects = vec![
            Project::new(1).with_phase(phase(1, &["REQ1"])),
            Project::new(2).with_phase(phase(1, &["REQ1"])),
        ];
        let graph = TaskGraph::build(&projects).unwrap();

        let a = graph.instance(InstanceId(0)).unwrap();
        let b = graph.instance(InstanceId(1)).unwrap();
        assert_eq!(a.task.id, b.task.id);
        assert_ne!(a.id, b.id);
        assert_ne!(a.project_id, b.project_id);
    }

    #[test]
    fn test_empty_phase_keeps_chain() {
        let projects = vec![Project::new(1)
            .with_phase(phase(1, &["A"]))
            .with_phase(Phase::new(2))
            .with_phase(phase(3, &["B"]))];
        let graph = TaskGraph::build(&projects).unwrap();

        assert_eq!(graph.edges(), &[edge(1, 0)]);
    }

    #[test]
    fn test_first_task_has_no_dependee() {
        let projects = vec![Project::new(1).with_phase(phase(1, &["A", "B"]))];
        let graph = TaskGraph::build(&projects).unwrap();
        assert!(graph.edges().iter().all(|e| e.depender != InstanceId(0)));
    }

    #[test]
    fn test_declared_dependencies_inactive_by_default() {
        let projects = vec![Project::new(1).with_phase(
            phase(1, &["A", "B", "C"]).with_dependency(TaskDependency::new("C", "A")),
        )];
        let graph = TaskGraph::build(&projects).unwrap();

        assert_eq!(graph.declared_edges(), &[edge(2, 0)]);
        assert_eq!(graph.active_edges(false).len(), 2);
        let with_declared = graph.active_edges(true);
        assert_eq!(with_declared.len(), 3);
        assert!(with_declared.contains(&edge(2, 0)));
    }

    #[test]
    fn test_declared_duplicate_of_chain_edge_not_repeated() {
        let projects = vec![Project::new(1)
            .with_phase(phase(1, &["A", "B"]).with_dependency(TaskDependency::new("B", "A")))];
        let graph = TaskGraph::build(&projects).unwrap();
        assert_eq!(graph.active_edges(true), vec![edge(1, 0)]);
    }

    #[test]
    fn test_unknown_declared_dependency() {
        let projects = vec![Project::new(1)
            .with_phase(phase(1, &["A"]).with_dependency(TaskDependency::new("A", "Z")))];
        let err = TaskGraph::build(&projects).unwrap_err();
        assert!(err.has_kind(ValidationErrorKind::InvalidDependency));
    }

    #[test]
    fn test_empty_input() {
        let graph = TaskGraph::build(&[]).unwrap();
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
    }
}
