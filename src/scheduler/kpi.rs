//! Schedule quality metrics (KPIs).
//!
//! Computes plan-level indicators from a completed schedule, its task
//! graph and the resource pool.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Day count | Number of scheduled days |
//! | Total work | Sum of assigned durations |
//! | Utilization | busy / (days × daily allowance) per resource |
//! | Labor cost | Σ hours × resource hourly cost |
//! | Billed amount | Σ hours × task hourly price |
//! | Completion day | Last day with work, per project |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::HashMap;

use crate::graph::TaskGraph;
use crate::models::{as_hours, Resource, Schedule};

/// Plan performance indicators.
///
/// Time values are in milliseconds, money in the catalog's currency.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Number of days in the plan.
    pub day_count: usize,
    /// Number of assignments.
    pub assignment_count: usize,
    /// Sum of assigned durations (ms).
    pub total_work_ms: i64,
    /// Average resource utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-resource utilization, idle resources included.
    pub utilization_by_resource: HashMap<String, f64>,
    /// Cost of the work at resource rates.
    pub labor_cost: f64,
    /// Revenue of the work at task prices.
    pub billed_amount: f64,
    /// Last day with work, per project.
    pub completion_day_by_project: HashMap<u32, usize>,
}

impl ScheduleKpi {
    /// Computes KPIs for a schedule.
    ///
    /// # Arguments
    /// * `schedule` - The completed schedule.
    /// * `graph` - The graph it was built from (for task prices).
    /// * `resources` - The resource pool (for hourly costs).
    /// * `daily_allowance_ms` - Working time per resource per day.
    pub fn calculate(
        schedule: &Schedule,
        graph: &TaskGraph,
        resources: &[Resource],
        daily_allowance_ms: i64,
    ) -> Self {
        let day_count = schedule.day_count();
        let horizon = day_count as i64 * daily_allowance_ms;

        let mut total_work_ms: i64 = 0;
        let mut labor_cost = 0.0;
        let mut billed_amount = 0.0;
        let mut completion_day_by_project: HashMap<u32, usize> = HashMap::new();

        for a in schedule.assignments() {
            total_work_ms += a.duration_ms;
            let h = as_hours(a.duration_ms);

            if let Some(r) = resources.iter().find(|r| r.id == a.resource_id) {
                labor_cost += h * r.cost_per_hour;
            }
            if let Some(inst) = graph.instance(a.instance) {
                billed_amount += h * inst.task.fixed_hour_price;
            }

            let last = completion_day_by_project.entry(a.project_id).or_insert(0);
            *last = (*last).max(a.day);
        }

        let utilization_by_resource: HashMap<String, f64> = if horizon <= 0 {
            HashMap::new()
        } else {
            resources
                .iter()
                .map(|r| (r.id.clone(), schedule.busy_ms(&r.id) as f64 / horizon as f64))
                .collect()
        };

        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_resource.values().sum();
            sum / utilization_by_resource.len() as f64
        };

        Self {
            day_count,
            assignment_count: schedule.assignment_count(),
            total_work_ms,
            avg_utilization,
            utilization_by_resource,
            labor_cost,
            billed_amount,
            completion_day_by_project,
        }
    }

    /// Billed amount minus labor cost.
    pub fn margin(&self) -> f64 {
        self.billed_amount - self.labor_cost
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_days: usize, min_utilization: f64) -> bool {
        self.day_count <= max_days && self.avg_utilization >= min_utilization
    }
}
