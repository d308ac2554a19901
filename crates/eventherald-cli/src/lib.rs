//! eventherald binary support: configuration, dry-run preview, commands.
//!
//! This crate provides the `eventherald` command-line interface. Each
//! invocation performs one run and exits, so it is meant to be triggered by
//! cron or a systemd timer.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod preview;
pub mod secret;

pub use cli::Cli;
pub use error::{CliError, CliResult};
