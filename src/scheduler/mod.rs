//! Greedy day planner and KPI evaluation.
//!
//! # Algorithm
//!
//! `DayScheduler` is a single-pass greedy heuristic: it repeatedly places
//! the first dependency-free task on the first resource (in catalog order)
//! that still has enough time today, and rolls over to a new day when
//! nothing else fits. It is not optimal, but it is fast and deterministic.
//!
//! # KPI
//!
//! `ScheduleKpi` computes day count, utilization against the daily
//! allowance, and labor cost versus billed amount.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod greedy;
mod kpi;

pub use greedy::DayScheduler;
pub use kpi::ScheduleKpi;
