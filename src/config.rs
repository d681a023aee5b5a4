//! Planning run configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::hours;

/// Default working time per resource per day (ms).
pub const DEFAULT_DAILY_ALLOWANCE_MS: i64 = hours(8);

/// Settings for one planning run.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use u_dayplan::config::SchedulerConfig;
///
/// let config = SchedulerConfig::from_json(r#"{ "max_days": 30 }"#).unwrap();
/// assert_eq!(config.max_days, Some(30));
/// assert_eq!(config.daily_allowance_ms, 8 * 3_600_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Time every resource gets back at each day rollover (ms).
    pub daily_allowance_ms: i64,
    /// Upper bound on the number of days. `None` = unbounded.
    pub max_days: Option<usize>,
    /// Whether phase-declared dependencies join the chain edges.
    pub honor_declared_dependencies: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            daily_allowance_ms: DEFAULT_DAILY_ALLOWANCE_MS,
            max_days: None,
            honor_declared_dependencies: false,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the daily allowance (ms).
    pub fn with_daily_allowance(mut self, allowance_ms: i64) -> Self {
        self.daily_allowance_ms = allowance_ms;
        self
    }

    /// Limits the number of days.
    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = Some(max_days);
        self
    }

    /// Makes phase-declared dependencies active.
    pub fn with_declared_dependencies(mut self, honor: bool) -> Self {
        self.honor_declared_dependencies = honor;
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.daily_allowance_ms, 28_800_000);
        assert_eq!(c.max_days, None);
        assert!(!c.honor_declared_dependencies);
    }

    #[test]
    fn test_builder() {
        let c = SchedulerConfig::new()
            .with_daily_allowance(hours(6))
            .with_max_days(10)
            .with_declared_dependencies(true);
        assert_eq!(c.daily_allowance_ms, hours(6));
        assert_eq!(c.max_days, Some(10));
        assert!(c.honor_declared_dependencies);
    }

    #[test]
    fn test_from_json_partial() {
        let c = SchedulerConfig::from_json(r#"{"honor_declared_dependencies": true}"#).unwrap();
        assert!(c.honor_declared_dependencies);
        assert_eq!(c.daily_allowance_ms, DEFAULT_DAILY_ALLOWANCE_MS);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(SchedulerConfig::from_json("{ not json").is_err());
    }
}
