//! One announcement run.
//!
//! A run is a single pass:
//!
//! ```text
//! validate config ─▶ fetch events ─▶ select ─▶ format + dispatch (concurrent) ─▶ aggregate
//! ```
//!
//! Configuration and fetch failures abort the run with a [`RunError`].
//! Delivery failures only mark their own event as failed.

use chrono::{DateTime, Utc};
use eventherald_core::report::CATEGORY_RUN;
use eventherald_core::{MessageFormatter, NotificationOutcome, ReportSink, RunResult, partition};
use eventherald_providers::{EventSource, MessageChannel};
use futures_util::future::join_all;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::dispatch::NotificationDispatcher;
use crate::error::{RunError, RunnerResult};

/// Performs one run at `now`.
///
/// Every selected event is formatted and all posts are started together;
/// the result holds one outcome per fetched event, dispatched events first
/// in announcement order followed by the skipped ones.
///
/// # Errors
///
/// Returns [`RunError::Config`] when a credential is missing (nothing is
/// fetched or sent) and [`RunError::Fetch`] when the event list cannot be
/// retrieved (nothing is sent). Both are also reported to `sink`.
pub async fn run(
    now: DateTime<Utc>,
    config: &RunConfig,
    source: &dyn EventSource,
    channel: &dyn MessageChannel,
    sink: &dyn ReportSink,
) -> RunnerResult<RunResult> {
    let creds = match config.validate() {
        Ok(creds) => creds,
        Err(e) => {
            sink.capture_error("validate configuration", &e);
            return Err(e);
        }
    };

    sink.breadcrumb(
        CATEGORY_RUN,
        &format!("fetching events of guild {} from {}", creds.guild_id, source.name()),
    );
    let events = match source.fetch_events(creds.guild_id, creds.token).await {
        Ok(events) => events,
        Err(e) => {
            let err = RunError::from(e);
            sink.capture_error("fetch events", &err);
            return Err(err);
        }
    };

    let window = config.strategy.window(now, config.timezone);
    debug!(window = %window, strategy = %config.strategy, "computed window");
    let selection = partition(&events, &window, sink);
    info!(
        fetched = events.len(),
        selected = selection.selected.len(),
        window = %window,
        "selected events"
    );

    let formatter = MessageFormatter::new(config.format_options());
    let messages: Vec<_> = selection
        .selected
        .iter()
        .map(|event| (*event, formatter.format(event)))
        .collect();

    let dispatcher = NotificationDispatcher::new(channel, creds.channel_id, creds.token, sink);
    let mut outcomes = join_all(
        messages
            .iter()
            .map(|(event, text)| dispatcher.dispatch(event, text)),
    )
    .await;

    outcomes.extend(
        selection
            .skipped
            .iter()
            .map(|event| NotificationOutcome::skipped(&event.id)),
    );

    let result = RunResult::new(outcomes);
    sink.breadcrumb(CATEGORY_RUN, &format!("run finished: {}", result));
    info!(
        sent = result.sent(),
        skipped = result.skipped(),
        failed = result.failed(),
        "run finished"
    );
    Ok(result)
}
