//! Schedule (solution) model.
//!
//! A schedule is an ordered list of days; each day is an ordered list of
//! assignments in commit order. Day numbers are 1-based, assignment
//! indices within a day are 0-based.

use serde::{Deserialize, Serialize};

use super::InstanceId;

/// A complete day-by-day plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Days in ascending order.
    pub days: Vec<ScheduledDay>,
}

/// All work committed within one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledDay {
    /// Day number (1-based).
    pub day: usize,
    /// Assignments in commit order.
    pub assignments: Vec<Assignment>,
}

/// A resource committed to one task instance for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Day number (1-based).
    pub day: usize,
    /// Commit order within the day (0-based).
    pub index: usize,
    /// Assigned task instance.
    pub instance: InstanceId,
    /// Task id (denormalized for reporting).
    pub task_id: String,
    /// Owning project id.
    pub project_id: u32,
    /// Assigned resource id.
    pub resource_id: String,
    /// Estimated duration for this (task, resource) pair (ms).
    pub duration_ms: i64,
}

impl ScheduledDay {
    /// Creates an empty day.
    pub fn new(day: usize) -> Self {
        Self {
            day,
            assignments: Vec::new(),
        }
    }

    /// Whether nothing was committed on this day.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Total time a resource is busy on this day (ms).
    pub fn busy_ms(&self, resource_id: &str) -> i64 {
        self.assignments
            .iter()
            .filter(|a| a.resource_id == resource_id)
            .map(|a| a.duration_ms)
            .sum()
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finished day.
    pub fn push_day(&mut self, day: ScheduledDay) {
        self.days.push(day);
    }

    /// Number of days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of assignments across all days.
    pub fn assignment_count(&self) -> usize {
        self.days.iter().map(|d| d.assignments.len()).sum()
    }

    /// All assignments, day-ascending then in commit order.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.days.iter().flat_map(|d| d.assignments.iter())
    }

    /// Finds the assignment for a task instance.
    pub fn assignment_for_instance(&self, instance: InstanceId) -> Option<&Assignment> {
        self.assignments().find(|a| a.instance == instance)
    }

    /// Returns all assignments for a given resource.
    pub fn assignments_for_resource(&self, resource_id: &str) -> Vec<&Assignment> {
        self.assignments()
            .filter(|a| a.resource_id == resource_id)
            .collect()
    }

    /// Returns all assignments for a given project.
    pub fn assignments_for_project(&self, project_id: u32) -> Vec<&Assignment> {
        self.assignments()
            .filter(|a| a.project_id == project_id)
            .collect()
    }

    /// Total time a resource is busy across the whole schedule (ms).
    pub fn busy_ms(&self, resource_id: &str) -> i64 {
        self.days.iter().map(|d| d.busy_ms(resource_id)).sum()
    }

    /// Last day on which a project has work, if any.
    pub fn project_completion_day(&self, project_id: u32) -> Option<usize> {
        self.assignments()
            .filter(|a| a.project_id == project_id)
            .map(|a| a.day)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(day: usize, index: usize, inst: usize, resource: &str, ms: i64) -> Assignment {
        Assignment {
            day,
            index,
            instance: InstanceId(inst),
            task_id: format!("T{inst}"),
            project_id: (inst % 2) as u32 + 1,
            resource_id: resource.into(),
            duration_ms: ms,
        }
    }

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        let mut d1 = ScheduledDay::new(1);
        d1.assignments.push(assignment(1, 0, 0, "R1", 1000));
        d1.assignments.push(assignment(1, 1, 1, "R2", 2000));
        d1.assignments.push(assignment(1, 2, 2, "R1", 500));
        s.push_day(d1);
        let mut d2 = ScheduledDay::new(2);
        d2.assignments.push(assignment(2, 0, 3, "R1", 3000));
        s.push_day(d2);
        s
    }

    #[test]
    fn test_counts() {
        let s = sample_schedule();
        assert_eq!(s.day_count(), 2);
        assert_eq!(s.assignment_count(), 4);
    }

    #[test]
    fn test_assignment_order() {
        let s = sample_schedule();
        let order: Vec<usize> = s.assignments().map(|a| a.instance.index()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_assignment_for_instance() {
        let s = sample_schedule();
        let a = s.assignment_for_instance(InstanceId(3)).unwrap();
        assert_eq!(a.day, 2);
        assert_eq!(a.resource_id, "R1");
        assert!(s.assignment_for_instance(InstanceId(99)).is_none());
    }

    #[test]
    fn test_busy_time() {
        let s = sample_schedule();
        assert_eq!(s.days[0].busy_ms("R1"), 1500);
        assert_eq!(s.days[1].busy_ms("R2"), 0);
        assert_eq!(s.busy_ms("R1"), 4500);
        assert_eq!(s.assignments_for_resource("R1").len(), 3);
    }

    #[test]
    fn test_project_queries() {
        let s = sample_schedule();
        // project 1: instances 0, 2; project 2: instances 1, 3
        assert_eq!(s.assignments_for_project(1).len(), 2);
        assert_eq!(s.project_completion_day(1), Some(1));
        assert_eq!(s.project_completion_day(2), Some(2));
        assert_eq!(s.project_completion_day(9), None);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert_eq!(s.day_count(), 0);
        assert_eq!(s.assignment_count(), 0);
        assert!(ScheduledDay::new(1).is_empty());
    }
}
