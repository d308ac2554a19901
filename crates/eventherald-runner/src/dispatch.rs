//! Delivery of one announcement.

use eventherald_core::report::CATEGORY_DISPATCH;
use eventherald_core::{Event, NotificationOutcome, ReportSink};
use eventherald_providers::MessageChannel;
use tracing::{debug, warn};

/// Posts announcements to one channel with one credential.
///
/// A dispatcher never retries and never fails the caller: every attempt ends
/// in a [`NotificationOutcome`].
pub struct NotificationDispatcher<'a> {
    channel: &'a dyn MessageChannel,
    channel_id: &'a str,
    token: &'a str,
    sink: &'a dyn ReportSink,
}

impl<'a> NotificationDispatcher<'a> {
    /// Creates a dispatcher posting to `channel_id`.
    pub fn new(
        channel: &'a dyn MessageChannel,
        channel_id: &'a str,
        token: &'a str,
        sink: &'a dyn ReportSink,
    ) -> Self {
        Self {
            channel,
            channel_id,
            token,
            sink,
        }
    }

    /// Posts `text` for `event` and reports how it went.
    pub async fn dispatch(&self, event: &Event, text: &str) -> NotificationOutcome {
        debug!(event_id = %event.id, channel = self.channel.name(), "posting announcement");

        match self
            .channel
            .post_message(self.channel_id, self.token, text)
            .await
        {
            Ok(()) => {
                self.sink.breadcrumb(
                    CATEGORY_DISPATCH,
                    &format!("sent \"{}\" ({})", event.name, event.id),
                );
                NotificationOutcome::sent(&event.id)
            }
            Err(e) => {
                warn!(event_id = %event.id, error = %e, "announcement not delivered");
                self.sink.breadcrumb(
                    CATEGORY_DISPATCH,
                    &format!("failed \"{}\" ({})", event.name, event.id),
                );
                self.sink
                    .capture_error(&format!("dispatch event {}", event.id), &e);
                NotificationOutcome::failed(&event.id, e.to_string())
            }
        }
    }
}
