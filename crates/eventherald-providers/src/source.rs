//! Capability traits for the outside world a run talks to.
//!
//! A run needs exactly two remote capabilities:
//! - [`EventSource`] lists the scheduled events of a guild
//! - [`MessageChannel`] posts one text message to a channel
//!
//! Both take the credential per call; implementations hold no auth state.

use std::future::Future;
use std::pin::Pin;

use eventherald_core::Event;

use crate::error::{ProviderError, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the traits object-safe so a run can take
/// `&dyn EventSource` and `&dyn MessageChannel`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Lists the events a run considers.
pub trait EventSource: Send + Sync {
    /// Returns the name/type of this source (e.g., "discord").
    fn name(&self) -> &str;

    /// Fetches every event of `guild_id` in one call.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on network errors, rejected credentials, or an
    /// unparseable response.
    fn fetch_events<'a>(
        &'a self,
        guild_id: &'a str,
        token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<Event>>>;
}

/// Delivers announcements.
pub trait MessageChannel: Send + Sync {
    /// Returns the name/type of this channel (e.g., "discord").
    fn name(&self) -> &str;

    /// Posts `text` to `channel_id`. A message is either fully posted or not
    /// posted at all.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` carrying the channel's error payload or the
    /// transport failure.
    fn post_message<'a>(
        &'a self,
        channel_id: &'a str,
        token: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, ProviderResult<()>>;
}

/// An event source serving a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    events: Vec<Event>,
}

impl StaticSource {
    /// Creates a source that always returns `events`.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_events<'a>(
        &'a self,
        _guild_id: &'a str,
        _token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<Event>>> {
        let events = self.events.clone();
        Box::pin(async move { Ok(events) })
    }
}

/// An event source that always returns an error.
///
/// This is useful for testing or as a placeholder when a source
/// fails to initialize.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ProviderError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events<'a>(
        &'a self,
        _guild_id: &'a str,
        _token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<Event>>> {
        // ProviderError is not Clone; rebuild it from its parts.
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn static_source_returns_events() {
        let start = Utc.with_ymd_and_hms(2025, 2, 6, 18, 0, 0).unwrap();
        let source = StaticSource::new(vec![Event::new("1", "Raid", start)]);

        assert_eq!(source.name(), "static");
        let events = source.fetch_events("guild", "token").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Raid");
    }

    #[tokio::test]
    async fn error_source_returns_error() {
        let source = ErrorSource::new("test", ProviderError::configuration("not configured"));

        assert_eq!(source.name(), "test");
        let err = source.fetch_events("guild", "token").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.provider(), Some("test"));
        assert_eq!(err.message(), "not configured");
    }
}
