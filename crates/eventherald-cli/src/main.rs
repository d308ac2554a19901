//! eventherald CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use eventherald_core::{TracingConfig, init_tracing};

use eventherald_cli::cli::{Cli, Command, ConfigAction};
use eventherald_cli::commands::announce::{AnnounceOptions, announce, exit_code};
use eventherald_cli::commands::config as config_cmd;
use eventherald_cli::config::HeraldConfig;
use eventherald_cli::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config.with_format(cli.log_format)) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    // An explicit path must exist; the default one is optional.
    let (mut config, path) = match cli.config {
        Some(ref path) => (HeraldConfig::load_from(path)?, path.clone()),
        None => (HeraldConfig::load()?, HeraldConfig::default_path()),
    };
    config.apply_cli(&cli);

    match cli.command {
        Some(Command::Config { action }) => {
            match action {
                ConfigAction::Dump => config_cmd::dump(&config, &path)?,
                ConfigAction::Validate => config_cmd::validate(&config)?,
                ConfigAction::Path => config_cmd::path(&path)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let options = AnnounceOptions {
                dry_run: cli.dry_run,
                at: cli.at,
            };
            let result = announce(&config, options).await?;
            Ok(ExitCode::from(exit_code(&result, cli.strict)))
        }
    }
}
