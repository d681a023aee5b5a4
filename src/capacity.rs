//! Per-resource daily capacity bookkeeping.
//!
//! Tracks how much of the daily allowance each resource has left. Slots
//! are positions in the run's resource list, so lookups never go through
//! id strings.

use crate::error::{Result, SchedulerError};
use crate::models::{Resource, Task};

/// Remaining time per resource for the current day.
#[derive(Debug, Clone)]
pub struct CapacityTracker {
    allowance_ms: i64,
    remaining: Vec<i64>,
}

impl CapacityTracker {
    /// Creates a tracker with every slot at the full allowance.
    pub fn new(resource_count: usize, allowance_ms: i64) -> Self {
        Self {
            allowance_ms,
            remaining: vec![allowance_ms; resource_count],
        }
    }

    /// Fixed daily allowance (ms).
    pub fn allowance_ms(&self) -> i64 {
        self.allowance_ms
    }

    /// Remaining time in a slot (ms).
    pub fn remaining_ms(&self, slot: usize) -> Option<i64> {
        self.remaining.get(slot).copied()
    }

    /// Duration the resource would spend on the task, if it can take it now.
    ///
    /// Requires a tag match, an estimate for this resource, and
    /// `remaining >= estimate`.
    pub fn can_accept(&self, slot: usize, resource: &Resource, task: &Task) -> Option<i64> {
        let remaining = self.remaining_ms(slot)?;
        resource
            .eligible_estimate(task)
            .filter(|&needed| remaining - needed >= 0)
    }

    /// Deducts a duration from a slot and returns what is left.
    ///
    /// # Errors
    /// `SchedulerError::Integrity` for an unknown slot or a deduction that
    /// would leave the slot negative.
    pub fn commit(&mut self, slot: usize, duration_ms: i64) -> Result<i64> {
        let remaining = self
            .remaining
            .get_mut(slot)
            .ok_or_else(|| SchedulerError::Integrity(format!("unknown resource slot {slot}")))?;
        let left = *remaining - duration_ms;
        if left < 0 {
            return Err(SchedulerError::Integrity(format!(
                "slot {slot} has {} ms left, cannot deduct {duration_ms} ms",
                *remaining
            )));
        }
        *remaining = left;
        Ok(left)
    }

    /// Restores every slot to the daily allowance.
    pub fn reset_all(&mut self) {
        self.remaining.fill(self.allowance_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{hours, Tag};

    fn dev_resource() -> Resource {
        Resource::new("R1").with_tag(Tag::WebDeveloper)
    }

    #[test]
    fn test_can_accept_and_commit() {
        let mut tracker = CapacityTracker::new(1, hours(8));
        let r = dev_resource();
        let task = Task::new("A", Tag::WebDeveloper).with_estimate("R1", hours(5));

        assert_eq!(tracker.can_accept(0, &r, &task), Some(hours(5)));
        assert_eq!(tracker.commit(0, hours(5)).unwrap(), hours(3));
        assert_eq!(tracker.can_accept(0, &r, &task), None);
    }

    #[test]
    fn test_exact_exhaustion() {
        let mut tracker = CapacityTracker::new(1, hours(8));
        let r = dev_resource();
        let task = Task::new("A", Tag::WebDeveloper).with_estimate("R1", hours(4));

        tracker.commit(0, hours(4)).unwrap();
        assert_eq!(tracker.can_accept(0, &r, &task), Some(hours(4)));
        assert_eq!(tracker.commit(0, hours(4)).unwrap(), 0);
        assert_eq!(tracker.remaining_ms(0), Some(0));
    }

    #[test]
    fn test_tag_mismatch() {
        let tracker = CapacityTracker::new(1, hours(8));
        let task = Task::new("A", Tag::WebDesigner).with_estimate("R1", hours(1));
        assert_eq!(tracker.can_accept(0, &dev_resource(), &task), None);
    }

    #[test]
    fn test_overdraw_rejected() {
        let mut tracker = CapacityTracker::new(1, hours(1));
        let err = tracker.commit(0, hours(2)).unwrap_err();
        assert!(matches!(err, SchedulerError::Integrity(_)));
        assert_eq!(tracker.remaining_ms(0), Some(hours(1)));
    }

    #[test]
    fn test_unknown_slot() {
        let mut tracker = CapacityTracker::new(1, hours(8));
        assert!(tracker.commit(3, 1).is_err());
        assert_eq!(tracker.remaining_ms(3), None);
    }

    #[test]
    fn test_reset_all() {
        let mut tracker = CapacityTracker::new(2, hours(8));
        tracker.commit(0, hours(3)).unwrap();
        tracker.commit(1, hours(8)).unwrap();
        tracker.reset_all();
        assert_eq!(tracker.remaining_ms(0), Some(hours(8)));
        assert_eq!(tracker.remaining_ms(1), Some(hours(8)));
        assert_eq!(tracker.allowance_ms(), hours(8));
    }
}
