//! Duration helpers.
//!
//! All durations in this crate are integer milliseconds. Catalogs are
//! usually authored in minutes and hours, so these helpers convert without
//! introducing any rounding.

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Converts whole minutes to milliseconds.
#[inline]
pub const fn minutes(m: i64) -> i64 {
    m * MS_PER_MINUTE
}

/// Converts whole hours to milliseconds.
#[inline]
pub const fn hours(h: i64) -> i64 {
    h * MS_PER_HOUR
}

/// Converts milliseconds to fractional hours.
#[inline]
pub fn as_hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}

/// Formats a duration as `H:MM:SS`.
///
/// Sub-second remainders are truncated. Negative durations get a leading `-`.
pub fn format_hms(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let total_secs = ms.unsigned_abs() / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{sign}{h}:{m:02}:{s:02}")
}
