//! The default command: one announcement run.

use chrono::{DateTime, Utc};
use eventherald_core::{RunResult, TracingSink};
use eventherald_providers::MessageChannel;
use eventherald_providers::discord::DiscordClient;
use tracing::{info, warn};

use crate::config::HeraldConfig;
use crate::error::CliResult;
use crate::preview::PreviewChannel;

/// Channel id used for previews when none is configured.
const PREVIEW_CHANNEL_ID: &str = "dry-run";

/// Exit status when `--strict` is set and some announcement failed.
const UNDELIVERED_EXIT: u8 = 2;

/// How a run is performed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnounceOptions {
    /// Print instead of posting.
    pub dry_run: bool,
    /// Instant the run behaves as if it were started at.
    pub at: Option<DateTime<Utc>>,
}

/// Fetches, selects and posts announcements.
pub async fn announce(config: &HeraldConfig, options: AnnounceOptions) -> CliResult<RunResult> {
    let mut run_config = config.to_run_config()?;
    let client = DiscordClient::new(config.to_discord_config()?)?;
    let now = options.at.unwrap_or_else(Utc::now);

    let preview;
    let channel: &dyn MessageChannel = if options.dry_run {
        if run_config
            .channel_id
            .as_deref()
            .is_none_or(|id| id.trim().is_empty())
        {
            run_config.channel_id = Some(PREVIEW_CHANNEL_ID.to_string());
        }
        preview = PreviewChannel::stdout();
        &preview
    } else {
        &client
    };

    info!(
        now = %now,
        strategy = %run_config.strategy,
        dry_run = options.dry_run,
        "starting run"
    );
    let result = eventherald_runner::run(now, &run_config, &client, channel, &TracingSink).await?;

    for failure in result.failures() {
        warn!(
            event_id = %failure.event_id,
            error = failure.error_detail.as_deref().unwrap_or_default(),
            "announcement failed"
        );
    }
    info!("{}", result);
    Ok(result)
}

/// Maps a completed run to the process exit status.
pub fn exit_code(result: &RunResult, strict: bool) -> u8 {
    if strict && !result.all_delivered() {
        UNDELIVERED_EXIT
    } else {
        0
    }
}
