//! Resource model.
//!
//! Resources are the workers that perform tasks. Each resource carries a
//! set of role tags, an hourly cost and an informational total budget.
//! The per-day remaining time is run state and lives in
//! [`CapacityTracker`](crate::capacity::CapacityTracker), not here.

use serde::{Deserialize, Serialize};

use super::{Tag, Task};

/// A worker that can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Total available time over the planning horizon (ms). Informational.
    #[serde(default)]
    pub available_ms: i64,
    /// Economic cost per hour.
    #[serde(default)]
    pub cost_per_hour: f64,
    /// Roles this resource can fill.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Resource {
    /// Creates a resource with no tags.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            available_ms: 0,
            cost_per_hour: 0.0,
            tags: Vec::new(),
        }
    }

    /// Adds a role tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Sets the total available time (ms).
    pub fn with_available(mut self, available_ms: i64) -> Self {
        self.available_ms = available_ms;
        self
    }

    /// Sets the hourly cost.
    pub fn with_cost(mut self, cost_per_hour: f64) -> Self {
        self.cost_per_hour = cost_per_hour;
        self
    }

    /// Whether this resource carries a tag.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Duration this resource needs for a task, if it is eligible at all.
    ///
    /// Eligible means the tag matches and the task has an estimate for
    /// this resource. Remaining capacity is not considered.
    pub fn eligible_estimate(&self, task: &Task) -> Option<i64> {
        if !self.has_tag(&task.tag) {
            return None;
        }
        task.estimate_for(&self.id)
    }
}
