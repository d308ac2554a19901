//! Discord client configuration.

use std::time::Duration;
use url::Url;

/// Configuration for [`DiscordClient`](super::DiscordClient).
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Base URL of the REST API, always ending in `/`.
    api_base: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl DiscordConfig {
    /// The public Discord REST API.
    pub const DEFAULT_API_BASE: &'static str = "https://discord.com/api/v10/";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a configuration pointing at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(api_base: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let url = Url::parse(api_base.as_ref().trim())?;
        let mut api_base = url.to_string();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }
        Ok(Self {
            api_base,
            ..Default::default()
        })
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Builds the URL of `path` (without a leading `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            // Discord expects bots to identify as "DiscordBot (url, version)".
            user_agent: format!(
                "DiscordBot ({}, {})",
                env!("CARGO_PKG_REPOSITORY"),
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}
