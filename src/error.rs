//! Error type for planning runs.

use crate::validation::{ValidationError, ValidationErrorKind};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors that abort a planning run.
///
/// No partial schedule is produced when any of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The catalog cannot be scheduled as given.
    #[error("invalid configuration ({} problem(s)): {}", .0.len(), first_message(.0))]
    Configuration(Vec<ValidationError>),

    /// The active dependency edges contain a cycle.
    #[error("dependency cycle: {0}")]
    Cycle(String),

    /// Internal bookkeeping went wrong during a run.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// The run needed more days than the configured limit.
    #[error("schedule does not fit within {0} day(s)")]
    DayLimitExceeded(usize),

    /// Catalog or configuration JSON could not be read.
    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("")
}

impl From<Vec<ValidationError>> for SchedulerError {
    /// A cycle turns the whole set into `Cycle`, with any other problems
    /// appended to its message; otherwise it is a configuration problem.
    fn from(errors: Vec<ValidationError>) -> Self {
        if !errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency)
        {
            return SchedulerError::Configuration(errors);
        }

        let (cycles, others): (Vec<_>, Vec<_>) = errors
            .iter()
            .partition(|e| e.kind == ValidationErrorKind::CyclicDependency);
        let cycle = cycles[0];
        if others.is_empty() {
            return SchedulerError::Cycle(cycle.message.clone());
        }

        let rest: Vec<String> = others.iter().map(|e| e.to_string()).collect();
        SchedulerError::Cycle(format!(
            "{} (also {} other problem(s): {})",
            cycle.message,
            rest.len(),
            rest.join("; ")
        ))
    }
}

impl SchedulerError {
    /// Validation problems carried by a configuration error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SchedulerError::Configuration(errors) => errors,
            _ => &[],
        }
    }

    /// Whether this is a configuration error containing the given kind.
    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        self.validation_errors().iter().any(|e| e.kind == kind)
    }
}
