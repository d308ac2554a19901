//! Configuration commands.

use std::path::Path;

use crate::config::HeraldConfig;
use crate::error::{CliError, CliResult};

/// Dump the effective configuration to stdout, token redacted.
pub fn dump(config: &HeraldConfig, path: &Path) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(&config.redacted())
        .map_err(|e| CliError::config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
///
/// Every missing credential is listed, not just the first one.
pub fn validate(config: &HeraldConfig) -> CliResult<()> {
    config.to_discord_config()?;
    let run = config.to_run_config()?;
    run.validate()
        .map_err(|e| CliError::config(e.to_string()))?;

    println!(
        "Configuration is valid ({} window, UTC{}).",
        run.strategy, run.timezone
    );
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> CliResult<()> {
    println!("config: {}", path.display());
    Ok(())
}
