//! Greedy day-by-day scheduler.
//!
//! # Algorithm
//!
//! 1. Build the task-instance graph and validate feasibility.
//! 2. Scan the remaining instances in build order. Skip any instance that
//!    still waits on a dependee, unless it is the only one left.
//! 3. For the first free instance some resource can take, pick the first
//!    resource in catalog order with a tag match and enough time left
//!    today. Commit, deduct, drop the instance and every edge that waited
//!    on it, then scan again from the top.
//! 4. If a full scan places nothing, close the day, open the next one and
//!    reset every resource to the daily allowance.
//! 5. Stop when nothing remains; the last day is closed as is.
//!
//! # Complexity
//! O(n² · (e + r)) worst case where n=instances, e=edges, r=resources.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use tracing::{debug, info, warn};

use crate::capacity::CapacityTracker;
use crate::catalog::Catalog;
use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::graph::{DependencyEdge, TaskGraph};
use crate::models::{Assignment, InstanceId, Project, Resource, Schedule, ScheduledDay};
use crate::validation::{validate_plan, ValidationError, ValidationErrorKind};

/// Capacity-aware, dependency-respecting greedy scheduler.
///
/// Holds configuration only; every call builds its own run state, so one
/// scheduler can be reused across runs and produces identical output for
/// identical input.
///
/// # Example
///
/// ```
/// use u_dayplan::models::{hours, Phase, Project, Resource, Tag, Task};
/// use u_dayplan::scheduler::DayScheduler;
///
/// let projects = vec![Project::new(1).with_phase(
///     Phase::new(1)
///         .with_task(Task::new("A", Tag::WebDeveloper).with_estimate("R1", hours(5)))
///         .with_task(Task::new("B", Tag::WebDeveloper).with_estimate("R1", hours(5))),
/// )];
/// let resources = vec![Resource::new("R1").with_tag(Tag::WebDeveloper)];
///
/// let schedule = DayScheduler::new().schedule(&projects, &resources).unwrap();
/// assert_eq!(schedule.day_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DayScheduler {
    config: SchedulerConfig,
}

impl DayScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules projects on resources.
    pub fn schedule(&self, projects: &[Project], resources: &[Resource]) -> Result<Schedule> {
        let graph = TaskGraph::build(projects)?;
        self.schedule_graph(&graph, resources)
    }

    /// Schedules a whole catalog.
    pub fn schedule_catalog(&self, catalog: &Catalog) -> Result<Schedule> {
        self.schedule(&catalog.projects, &catalog.resources)
    }

    /// Schedules an already built graph.
    ///
    /// # Errors
    /// - `Configuration` / `Cycle` if validation fails (nothing is placed)
    /// - `DayLimitExceeded` if `max_days` is set and the plan needs more
    /// - `Integrity` on internal bookkeeping failures
    pub fn schedule_graph(&self, graph: &TaskGraph, resources: &[Resource]) -> Result<Schedule> {
        let edges = graph.active_edges(self.config.honor_declared_dependencies);

        if let Err(errors) = validate_plan(graph, &edges, resources, &self.config) {
            for e in &errors {
                warn!(kind = ?e.kind, "{}", e.message);
            }
            return Err(SchedulerError::from(errors));
        }

        info!(
            instances = graph.len(),
            edges = edges.len(),
            resources = resources.len(),
            allowance_ms = self.config.daily_allowance_ms,
            "planning run started"
        );

        if graph.is_empty() {
            return Ok(Schedule::new());
        }

        let mut run = Run::new(graph, edges, resources, self.config.daily_allowance_ms);

        loop {
            let placed = run.place_next()?;

            if run.remaining.is_empty() {
                run.close_day();
                self.check_day_limit(run.schedule.day_count())?;
                break;
            }

            if !placed {
                if run.day.is_empty() {
                    return Err(SchedulerError::Configuration(vec![ValidationError::new(
                        ValidationErrorKind::NoProgress,
                        format!(
                            "Day {} could not place any of {} remaining task(s)",
                            run.day.day,
                            run.remaining.len()
                        ),
                    )]));
                }

                run.close_day();
                // Another day is about to open.
                self.check_day_limit(run.schedule.day_count() + 1)?;
                run.open_day();
            }
        }

        info!(
            days = run.schedule.day_count(),
            assignments = run.schedule.assignment_count(),
            "planning run finished"
        );
        Ok(run.schedule)
    }

    fn check_day_limit(&self, days: usize) -> Result<()> {
        match self.config.max_days {
            Some(max) if days > max => Err(SchedulerError::DayLimitExceeded(max)),
            _ => Ok(()),
        }
    }
}

/// Mutable state of one planning run.
struct Run<'a> {
    graph: &'a TaskGraph,
    resources: &'a [Resource],
    remaining: Vec<InstanceId>,
    edges: Vec<DependencyEdge>,
    capacity: CapacityTracker,
    schedule: Schedule,
    day: ScheduledDay,
}

impl<'a> Run<'a> {
    fn new(
        graph: &'a TaskGraph,
        edges: Vec<DependencyEdge>,
        resources: &'a [Resource],
        allowance_ms: i64,
    ) -> Self {
        Self {
            graph,
            resources,
            remaining: graph.instances().iter().map(|i| i.id).collect(),
            edges,
            capacity: CapacityTracker::new(resources.len(), allowance_ms),
            schedule: Schedule::new(),
            day: ScheduledDay::new(1),
        }
    }

    fn is_blocked(&self, id: InstanceId) -> bool {
        self.edges.iter().any(|e| e.depender == id)
    }

    /// One scan pass. Places at most one instance.
    ///
    /// A lone remaining instance is placed even if an edge still points at
    /// it. Validated runs never carry such an edge, so this only matters
    /// for edge sets that skipped validation.
    fn place_next(&mut self) -> Result<bool> {
        let last_one = self.remaining.len() == 1;

        for pos in 0..self.remaining.len() {
            let id = self.remaining[pos];
            if !last_one && self.is_blocked(id) {
                continue;
            }

            let inst = self.graph.instance(id).ok_or_else(|| {
                SchedulerError::Integrity(format!("instance {id} is not part of this run"))
            })?;

            let Some((slot, duration_ms)) = self
                .resources
                .iter()
                .enumerate()
                .find_map(|(slot, r)| self.capacity.can_accept(slot, r, &inst.task).map(|d| (slot, d)))
            else {
                continue;
            };

            let left = self.capacity.commit(slot, duration_ms)?;
            let resource = &self.resources[slot];
            debug!(
                day = self.day.day,
                task = %inst.task.id,
                project = inst.project_id,
                resource = %resource.id,
                duration_ms,
                left_ms = left,
                "task assigned"
            );

            self.day.assignments.push(Assignment {
                day: self.day.day,
                index: self.day.assignments.len(),
                instance: id,
                task_id: inst.task.id.clone(),
                project_id: inst.project_id,
                resource_id: resource.id.clone(),
                duration_ms,
            });
            self.remaining.remove(pos);
            self.edges.retain(|e| e.dependee != id);
            return Ok(true);
        }

        Ok(false)
    }

    fn close_day(&mut self) {
        let next = ScheduledDay::new(self.day.day + 1);
        let done = std::mem::replace(&mut self.day, next);
        debug!(day = done.day, assignments = done.assignments.len(), "day closed");
        self.schedule.push_day(done);
    }

    fn open_day(&mut self) {
        self.capacity.reset_all();
        info!(day = self.day.day, remaining = self.remaining.len(), "day rollover");
    }
}
