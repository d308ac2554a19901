//! CLI error types.

use thiserror::Error;

use crate::secret::SecretError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end an `eventherald` invocation with a failure exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or value error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A secret reference could not be resolved.
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// The Discord client could not be set up.
    #[error("provider error: {0}")]
    Provider(#[from] eventherald_providers::ProviderError),

    /// The run aborted.
    #[error("run aborted: {0}")]
    Run(#[from] eventherald_runner::RunError),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
