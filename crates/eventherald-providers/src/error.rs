//! Error types for event source and message channel operations.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The credential was rejected (401).
    AuthenticationFailed,
    /// The credential lacks access to the guild or channel (403).
    AuthorizationFailed,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Rate limit exceeded (429).
    RateLimited,
    /// Server returned an error (5xx or an unclassified status).
    ServerError,
    /// Invalid response from the server - parse error, unexpected format.
    InvalidResponse,
    /// Guild or channel not found (404).
    NotFound,
    /// Request was invalid (400), e.g. a message the channel refused.
    BadRequest,
    /// Configuration error - missing or invalid config.
    ConfigurationError,
}

impl ProviderErrorCode {
    /// Returns true if retrying the same call later could succeed.
    ///
    /// Nothing in a run retries; this is for operators reading reports.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns the snake_case name of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
        }
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            _ => Self::ServerError,
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from an event source or message channel.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// The provider that generated this error (e.g., "discord").
    provider: Option<String>,
    /// HTTP status of the rejected call, if there was one.
    status: Option<u16>,
    /// How long the remote API asked callers to wait (429 only).
    retry_after: Option<Duration>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            status: None,
            retry_after: None,
            source: None,
        }
    }

    /// Creates an error for a rejected HTTP call.
    ///
    /// `body` is the response payload as returned by the remote API.
    pub fn http(status: u16, body: impl AsRef<str>) -> Self {
        let body = body.as_ref().trim();
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };
        let mut err = Self::new(ProviderErrorCode::from_status(status), message);
        err.status = Some(status);
        err
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Records the wait the remote API asked for.
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the provider name, if set.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the HTTP status, if the error came from a rejected call.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the requested wait before calling again, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Returns true if this error is transient.
    pub fn is_transient(&self) -> bool {
        self.code.is_transient()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(retry_after) = self.retry_after {
            write!(f, " (retry after {:.1}s)", retry_after.as_secs_f64())?;
        }
        Ok(())
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_transient() {
        assert!(ProviderErrorCode::NetworkError.is_transient());
        assert!(ProviderErrorCode::RateLimited.is_transient());
        assert!(ProviderErrorCode::ServerError.is_transient());
        assert!(!ProviderErrorCode::AuthenticationFailed.is_transient());
        assert!(!ProviderErrorCode::NotFound.is_transient());
    }

    #[test]
    fn error_code_from_status() {
        assert_eq!(ProviderErrorCode::from_status(400), ProviderErrorCode::BadRequest);
        assert_eq!(
            ProviderErrorCode::from_status(401),
            ProviderErrorCode::AuthenticationFailed
        );
        assert_eq!(
            ProviderErrorCode::from_status(403),
            ProviderErrorCode::AuthorizationFailed
        );
        assert_eq!(ProviderErrorCode::from_status(404), ProviderErrorCode::NotFound);
        assert_eq!(ProviderErrorCode::from_status(429), ProviderErrorCode::RateLimited);
        assert_eq!(ProviderErrorCode::from_status(502), ProviderErrorCode::ServerError);
        assert_eq!(ProviderErrorCode::from_status(418), ProviderErrorCode::ServerError);
    }

    #[test]
    fn http_error_keeps_payload() {
        let err = ProviderError::http(403, r#"{"message": "Missing Access", "code": 50001}"#)
            .with_provider("discord");
        assert_eq!(err.code(), ProviderErrorCode::AuthorizationFailed);
        assert_eq!(err.status(), Some(403));
        assert_eq!(
            err.to_string(),
            r#"[discord] authorization_failed: HTTP 403: {"message": "Missing Access", "code": 50001}"#
        );
    }

    #[test]
    fn http_error_without_body() {
        let err = ProviderError::http(500, "  ");
        assert_eq!(err.message(), "HTTP 500");
    }

    #[test]
    fn rate_limit_shows_retry_after() {
        let err = ProviderError::http(429, r#"{"message": "You are being rate limited."}"#)
            .with_retry_after(Duration::from_millis(1500));
        assert_eq!(err.code(), ProviderErrorCode::RateLimited);
        assert_eq!(err.retry_after(), Some(Duration::from_millis(1500)));
        assert!(err.to_string().ends_with("(retry after 1.5s)"));
    }

    #[test]
    fn provider_error_creation() {
        let err = ProviderError::configuration("invalid base URL");
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.message(), "invalid base URL");
        assert!(err.provider().is_none());
        assert!(err.status().is_none());
        assert!(!err.is_transient());
    }

    #[test]
    fn provider_error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("connection reset");
        let err = ProviderError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
    }
}
