//! Secret reference resolver.
//!
//! The bot token in `config.toml` can reference a secret stored outside the
//! file:
//!
//! - `pass::path/in/store` runs `pass show path/in/store` and uses the first line
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - anything else is used as-is

use thiserror::Error;

/// Errors from resolving a secret reference.
#[derive(Debug, Error)]
pub enum SecretError {
    /// `pass` could not be started.
    #[error("failed to run `pass show {path}`: {source}")]
    PassSpawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `pass` ran but did not produce a secret.
    #[error("`pass show {path}` failed: {reason}")]
    PassFailed { path: String, reason: String },

    /// The referenced environment variable is not set.
    #[error("environment variable `{0}` is not set")]
    MissingEnv(String),
}

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, SecretError> {
    if let Some(path) = value.strip_prefix("pass::") {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        std::env::var(var).map_err(|_| SecretError::MissingEnv(var.to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn resolve_pass(path: &str) -> Result<String, SecretError> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|source| SecretError::PassSpawn {
            path: path.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SecretError::PassFailed {
            path: path.to_string(),
            reason: format!("exit {}: {}", output.status, stderr.trim()),
        });
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| SecretError::PassFailed {
            path: path.to_string(),
            reason: "no output".to_string(),
        })
}
