//! Task model.
//!
//! A task is a template unit of work: a required role, an estimated
//! duration per resource, and a fixed hourly price. The same task id may
//! appear in several projects; each occurrence becomes a distinct
//! instance when the dependency graph is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Tag;

/// Arena index of one task instance.
///
/// Task ids repeat across projects, so instances are told apart by this
/// key, never by id string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub usize);

impl InstanceId {
    /// Position in the instance arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A task template.
///
/// # Time Representation
/// Estimates are in milliseconds. Only resources listed in
/// `estimated_ms` can perform the task, and only if they also carry `tag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier. Not unique across projects.
    pub id: String,
    /// Required role.
    pub tag: Tag,
    /// Estimated duration per resource (resource_id → ms).
    #[serde(default)]
    pub estimated_ms: BTreeMap<String, i64>,
    /// Price charged per hour of work on this task.
    #[serde(default)]
    pub fixed_hour_price: f64,
}

impl Task {
    /// Creates a new task with the given ID and required role.
    pub fn new(id: impl Into<String>, tag: Tag) -> Self {
        Self {
            id: id.into(),
            tag,
            estimated_ms: BTreeMap::new(),
            fixed_hour_price: 0.0,
        }
    }

    /// Adds an estimate for a resource (ms).
    pub fn with_estimate(mut self, resource_id: impl Into<String>, duration_ms: i64) -> Self {
        self.estimated_ms.insert(resource_id.into(), duration_ms);
        self
    }

    /// Sets the hourly price.
    pub fn with_price(mut self, fixed_hour_price: f64) -> Self {
        self.fixed_hour_price = fixed_hour_price;
        self
    }

    /// Estimated duration on a given resource, if that resource has one.
    pub fn estimate_for(&self, resource_id: &str) -> Option<i64> {
        self.estimated_ms.get(resource_id).copied()
    }

    /// Shortest estimate across all resources.
    pub fn min_estimate_ms(&self) -> Option<i64> {
        self.estimated_ms.values().copied().min()
    }
}

/// A dependency declared between two tasks of the same phase, by task id.
///
/// `depender` cannot start until `dependee` is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDependency {
    /// Task that waits.
    pub depender: String,
    /// Task that must finish first.
    pub dependee: String,
}

impl TaskDependency {
    /// Creates a dependency: `depender` depends on `dependee`.
    pub fn new(depender: impl Into<String>, dependee: impl Into<String>) -> Self {
        Self {
            depender: depender.into(),
            dependee: dependee.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::minutes;

    #[test]
    fn test_task_builder() {
        let task = Task::new("DEV1", Tag::WebDeveloper)
            .with_estimate("TDS", minutes(46))
            .with_estimate("FLD", minutes(58))
            .with_price(30.0);

        assert_eq!(task.id, "DEV1");
        assert_eq!(task.tag, Tag::WebDeveloper);
        assert_eq!(task.estimate_for("TDS"), Some(minutes(46)));
        assert_eq!(task.estimate_for("XDI"), None);
        assert_eq!(task.min_estimate_ms(), Some(minutes(46)));
        assert!((task.fixed_hour_price - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_task_without_estimates() {
        let task = Task::new("REQ1", Tag::ProjectManager);
        assert!(task.min_estimate_ms().is_none());
    }

    #[test]
    fn test_task_deserialize_defaults() {
        let task: Task =
            serde_json::from_str(r#"{"id":"DES3","tag":"WebDesigner"}"#).unwrap();
        assert_eq!(task.id, "DES3");
        assert!(task.estimated_ms.is_empty());
        assert_eq!(task.fixed_hour_price, 0.0);
    }

    #[test]
    fn test_dependency() {
        let dep = TaskDependency::new("B", "A");
        assert_eq!(dep.depender, "B");
        assert_eq!(dep.dependee, "A");
    }
}
