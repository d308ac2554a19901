//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use eventherald_core::{MessageStyle, TimeFormat, TracingOutputFormat, WindowStrategy};

/// eventherald - Announce tomorrow's Discord scheduled events
#[derive(Debug, Parser)]
#[command(name = "eventherald")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTHERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format (pretty, compact, json)
    #[arg(long, default_value_t = TracingOutputFormat::Compact)]
    pub log_format: TracingOutputFormat,

    // --- Discord flags ---
    /// Bot token (supports `env::` and `pass::` references)
    #[arg(long, env = "DISCORD_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Guild whose scheduled events are announced
    #[arg(long, env = "DISCORD_GUILD_ID")]
    pub guild_id: Option<String>,

    /// Channel the announcements are posted to
    #[arg(long, env = "DISCORD_ANNOUNCEMENTS_CHANNEL_ID")]
    pub channel_id: Option<String>,

    // --- Announcement flags ---
    /// Eligibility window (calendar_day, rolling_offset)
    #[arg(long)]
    pub strategy: Option<WindowStrategy>,

    /// Description style (plain, quoted)
    #[arg(long)]
    pub style: Option<MessageStyle>,

    /// Reference timezone as a UTC offset (e.g. +02:00)
    #[arg(long, allow_hyphen_values = true)]
    pub timezone: Option<String>,

    /// Clock for display times (h24, h12)
    #[arg(long)]
    pub time_format: Option<TimeFormat>,

    // --- Run flags ---
    /// Print announcements to stdout instead of posting them
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 2 when any announcement was not delivered
    #[arg(long)]
    pub strict: bool,

    /// Run as if the current time were this RFC 3339 instant
    #[arg(long, value_name = "RFC3339")]
    pub at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration (token redacted)
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
