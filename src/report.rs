//! Tabular export of a schedule.
//!
//! One row per assignment, day-ascending, then in commit order within the
//! day. Columns: `day, assignment_id, resource_id, task_id, project_id,
//! estimated_time`, with `estimated_time` rendered as `H:MM:SS`.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::models::{format_hms, Schedule};

/// Header line written by [`write_csv`].
pub const CSV_HEADER: [&str; 6] = [
    "day",
    "assignment_id",
    "resource_id",
    "task_id",
    "project_id",
    "estimated_time",
];

/// One exported assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Day number (1-based).
    pub day: usize,
    /// Assignment index within the day (0-based).
    pub assignment_id: usize,
    /// Resource id.
    pub resource_id: String,
    /// Task id.
    pub task_id: String,
    /// Owning project id.
    pub project_id: u32,
    /// Estimated duration, `H:MM:SS`.
    pub estimated_time: String,
}

impl ReportRow {
    fn fields(&self) -> [String; 6] {
        [
            self.day.to_string(),
            self.assignment_id.to_string(),
            self.resource_id.clone(),
            self.task_id.clone(),
            self.project_id.to_string(),
            self.estimated_time.clone(),
        ]
    }
}

/// Flattens a schedule into report rows.
pub fn rows(schedule: &Schedule) -> Vec<ReportRow> {
    schedule
        .assignments()
        .map(|a| ReportRow {
            day: a.day,
            assignment_id: a.index,
            resource_id: a.resource_id.clone(),
            task_id: a.task_id.clone(),
            project_id: a.project_id,
            estimated_time: format_hms(a.duration_ms),
        })
        .collect()
}

/// Writes the schedule as CSV with a header line.
pub fn write_csv<W: Write>(schedule: &Schedule, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    let rows = rows(schedule);
    for row in &rows {
        let line: Vec<String> = row.fields().iter().map(|f| escape_field(f)).collect();
        writeln!(writer, "{}", line.join(","))?;
    }
    writer.flush()?;
    info!(rows = rows.len(), days = schedule.day_count(), "schedule report written");
    Ok(())
}

/// Writes the report rows as a JSON array.
pub fn write_json<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &rows(schedule))?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
