//! Run error types.

use eventherald_providers::ProviderError;
use thiserror::Error;

/// Result type for run operations.
pub type RunnerResult<T> = Result<T, RunError>;

/// Errors that abort a run before any announcement is posted.
///
/// Per-event delivery failures are not errors; they are recorded as failed
/// outcomes in the run result.
#[derive(Debug, Error)]
pub enum RunError {
    /// Required configuration values are missing or blank.
    #[error("missing required configuration: {}", missing.join(", "))]
    Config { missing: Vec<&'static str> },

    /// The event source could not be queried.
    #[error("failed to fetch events: {0}")]
    Fetch(#[from] ProviderError),
}

impl RunError {
    /// Creates a configuration error naming the missing values.
    pub fn missing(missing: Vec<&'static str>) -> Self {
        Self::Config { missing }
    }

    /// Returns true for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}
