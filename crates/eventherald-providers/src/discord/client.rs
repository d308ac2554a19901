//! HTTP client for the Discord REST API.
//!
//! Two endpoints are used:
//! - `GET guilds/{guild}/scheduled-events` lists a guild's scheduled events
//! - `POST channels/{channel}/messages` posts an announcement

use std::time::Duration;

use chrono::{DateTime, Utc};
use eventherald_core::Event;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, EventSource, MessageChannel};

use super::config::DiscordConfig;

const PROVIDER_NAME: &str = "discord";

/// Discord REST client.
///
/// The client holds no credential; the bot token is passed to every call.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    config: DiscordConfig,
}

impl DiscordClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: DiscordConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_provider(PROVIDER_NAME)
                    .with_source(e)
            })?;

        Ok(Self { http, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DiscordConfig {
        &self.config
    }

    /// Lists the scheduled events of `guild_id`.
    pub async fn list_scheduled_events(
        &self,
        guild_id: &str,
        token: &str,
    ) -> ProviderResult<Vec<Event>> {
        let url = self.config.endpoint(&format!(
            "guilds/{}/scheduled-events",
            urlencoding::encode(guild_id)
        ));
        trace!(url = %url, "listing scheduled events");

        let response = self.send(self.http.get(&url), token).await?;
        let body = read_body(response).await?;

        let events = parse_scheduled_events(&body)?;
        debug!("fetched {} scheduled events for guild {}", events.len(), guild_id);
        Ok(events)
    }

    /// Posts `content` as a new message in `channel_id`.
    pub async fn create_message(
        &self,
        channel_id: &str,
        token: &str,
        content: &str,
    ) -> ProviderResult<()> {
        let url = self.config.endpoint(&format!(
            "channels/{}/messages",
            urlencoding::encode(channel_id)
        ));
        trace!(url = %url, "posting message");

        let request = self.http.post(&url).json(&CreateMessage { content });
        self.send(request, token).await?;
        debug!("posted message to channel {}", channel_id);
        Ok(())
    }

    /// Sends an authorized request and rejects non-success statuses.
    async fn send(&self, request: RequestBuilder, token: &str) -> ProviderResult<Response> {
        let response = request
            .header("Authorization", format!("Bot {}", token))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "received response");
        if status.is_success() {
            return Ok(response);
        }

        let header_wait = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<f64>().ok());
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "discord rejected request");

        let mut err = ProviderError::http(status.as_u16(), &body).with_provider(PROVIDER_NAME);
        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(wait) = retry_after(&body).or(header_wait) {
                err = err.with_retry_after(wait_duration(wait));
            }
        }
        Err(err)
    }
}

impl EventSource for DiscordClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_events<'a>(
        &'a self,
        guild_id: &'a str,
        token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<Event>>> {
        Box::pin(self.list_scheduled_events(guild_id, token))
    }
}

impl MessageChannel for DiscordClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn post_message<'a>(
        &'a self,
        channel_id: &'a str,
        token: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(self.create_message(channel_id, token, text))
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    let message = if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        format!("request failed: {}", e)
    };
    ProviderError::network(message)
        .with_provider(PROVIDER_NAME)
        .with_source(e)
}

/// Reads `retry_after` (seconds) from a rate limit payload.
fn retry_after(body: &str) -> Option<f64> {
    #[derive(Deserialize)]
    struct RateLimited {
        retry_after: f64,
    }

    serde_json::from_str::<RateLimited>(body)
        .ok()
        .map(|r| r.retry_after)
}

fn wait_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or_default()
}

async fn read_body(response: Response) -> ProviderResult<String> {
    response.text().await.map_err(|e| {
        ProviderError::network(format!("failed to read response: {}", e))
            .with_provider(PROVIDER_NAME)
            .with_source(e)
    })
}

/// Parses a scheduled-events listing into events.
///
/// Entries whose start time does not parse are dropped with a warning; a body
/// that is not a list of events fails as a whole.
fn parse_scheduled_events(body: &str) -> ProviderResult<Vec<Event>> {
    let listing: Vec<ApiScheduledEvent> = serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!("failed to parse scheduled events: {}", e))
            .with_provider(PROVIDER_NAME)
            .with_source(e)
    })?;

    Ok(listing.into_iter().filter_map(convert_event).collect())
}

fn convert_event(event: ApiScheduledEvent) -> Option<Event> {
    let start_time = DateTime::parse_from_rfc3339(&event.scheduled_start_time)
        .map_err(|e| {
            warn!(
                "dropping event {}: bad start time {:?}: {}",
                event.id, event.scheduled_start_time, e
            )
        })
        .ok()?
        .with_timezone(&Utc);

    let location = event.entity_metadata.and_then(|m| m.location);

    Some(Event {
        id: event.id,
        name: event.name,
        description: event.description,
        location,
        start_time,
    })
}

/// A guild scheduled event as returned by the API.
///
/// Only the fields an announcement needs are read; the rest are ignored.
#[derive(Debug, Deserialize)]
struct ApiScheduledEvent {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    scheduled_start_time: String,
    #[serde(default)]
    entity_metadata: Option<ApiEntityMetadata>,
}

/// Extra data of external events.
#[derive(Debug, Deserialize)]
struct ApiEntityMetadata {
    #[serde(default)]
    location: Option<String>,
}

/// Body of a create-message call.
#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}
