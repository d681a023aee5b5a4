//! Planning domain models.
//!
//! Provides the catalog types (tasks, phases, projects, resources) and the
//! solution types (assignments, days, schedules).
//!
//! # Domain Mappings
//!
//! | u-dayplan | Agency | Workshop | Support desk |
//! |-----------|--------|----------|--------------|
//! | Task | Deliverable | Job step | Ticket |
//! | Phase | Milestone | Work order | Sprint |
//! | Resource | Employee | Technician | Agent |
//! | Tag | Role | Trade | Queue |

mod duration;
mod project;
mod resource;
mod schedule;
mod tag;
mod task;

pub use duration::{as_hours, format_hms, hours, minutes, MS_PER_HOUR, MS_PER_MINUTE};
pub use project::{Phase, Project};
pub use resource::Resource;
pub use schedule::{Assignment, Schedule, ScheduledDay};
pub use tag::Tag;
pub use task::{InstanceId, Task, TaskDependency};
