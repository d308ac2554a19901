//! Run configuration.

use chrono::FixedOffset;
use eventherald_core::{FormatOptions, MessageStyle, TimeFormat, WindowStrategy};

use crate::error::RunError;

/// Everything a run needs besides the clock and its collaborators.
///
/// Credentials are kept as optional strings exactly as they were supplied;
/// [`RunConfig::validate`] decides whether they are usable.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Bot token presented on every remote call.
    pub token: Option<String>,

    /// Guild whose scheduled events are announced.
    pub guild_id: Option<String>,

    /// Channel the announcements are posted to.
    pub channel_id: Option<String>,

    /// How the eligibility window is computed.
    pub strategy: WindowStrategy,

    /// Description rendering.
    pub style: MessageStyle,

    /// Reference timezone for calendar days and display times.
    pub timezone: FixedOffset,

    /// Clock used for display times.
    pub time_format: TimeFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            token: None,
            guild_id: None,
            channel_id: None,
            strategy: WindowStrategy::default(),
            style: MessageStyle::default(),
            timezone: FormatOptions::default().timezone,
            time_format: TimeFormat::default(),
        }
    }
}

/// Validated, trimmed credentials borrowed from a [`RunConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Bot token.
    pub token: &'a str,
    /// Guild whose scheduled events are fetched.
    pub guild_id: &'a str,
    /// Channel announcements are posted to.
    pub channel_id: &'a str,
}

impl RunConfig {
    /// Creates a configuration with the three credentials set.
    pub fn new(
        token: impl Into<String>,
        guild_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            token: Some(token.into()),
            guild_id: Some(guild_id.into()),
            channel_id: Some(channel_id.into()),
            ..Default::default()
        }
    }

    /// Builder: set window strategy.
    pub fn with_strategy(mut self, strategy: WindowStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder: set description style.
    pub fn with_style(mut self, style: MessageStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: set reference timezone.
    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Builder: set time format.
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    /// Checks that every credential is present and non-blank.
    ///
    /// The error names all missing values, not just the first one.
    pub fn validate(&self) -> Result<Credentials<'_>, RunError> {
        let token = non_blank(&self.token);
        let guild_id = non_blank(&self.guild_id);
        let channel_id = non_blank(&self.channel_id);

        match (token, guild_id, channel_id) {
            (Some(token), Some(guild_id), Some(channel_id)) => Ok(Credentials {
                token,
                guild_id,
                channel_id,
            }),
            _ => {
                let missing = [
                    ("token", token.is_none()),
                    ("guild_id", guild_id.is_none()),
                    ("channel_id", channel_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(RunError::missing(missing))
            }
        }
    }

    /// Formatting options for this deployment.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions::for_strategy(self.strategy)
            .with_style(self.style)
            .with_timezone(self.timezone)
            .with_time_format(self.time_format)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
