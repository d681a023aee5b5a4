//! Capacity-aware greedy day planner.
//!
//! Allocates the tasks of phased projects to typed, capacity-limited
//! resources over discrete days. Tasks run in phase order, every resource
//! has a fixed daily time budget, and the result is a day-by-day list of
//! assignments.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Tag`, `Phase`, `Project`,
//!   `Resource`, `Assignment`, `ScheduledDay`, `Schedule`
//! - **`catalog`**: Catalog container, JSON loading, bundled sample data
//! - **`graph`**: Task-instance arena and dependency edges
//! - **`capacity`**: Per-resource daily capacity bookkeeping
//! - **`validation`**: Feasibility checks (eligibility, allowance, cycles)
//! - **`scheduler`**: The greedy day loop and plan KPIs
//! - **`report`**: CSV / JSON export of a schedule
//!
//! # Example
//!
//! ```
//! use u_dayplan::catalog::Catalog;
//! use u_dayplan::scheduler::DayScheduler;
//!
//! let catalog = Catalog::web_agency();
//! let schedule = DayScheduler::new().schedule_catalog(&catalog).unwrap();
//! assert_eq!(schedule.assignment_count(), catalog.task_count());
//!
//! let mut csv = Vec::new();
//! u_dayplan::report::write_csv(&schedule, &mut csv).unwrap();
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod capacity;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SchedulerError};
