//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventherald/config.toml` by default:
//!
//! ```toml
//! [discord]
//! token = "env::DISCORD_BOT_TOKEN"
//! guild_id = "81384788765712384"
//! channel_id = "381870553235193857"
//!
//! [announce]
//! strategy = "rolling_offset"
//! style = "quoted"
//! timezone = "+01:00"
//! time_format = "h24"
//! ```
//!
//! Command-line flags and their environment variables take precedence over
//! the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use eventherald_core::{MessageStyle, TimeFormat, WindowStrategy, parse_utc_offset};
use eventherald_providers::discord::DiscordConfig;
use eventherald_runner::RunConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use crate::secret::{self, SecretError};

/// Shown instead of the token in dumps.
const REDACTED: &str = "<redacted>";

// ---------------------------------------------------------------------------
// HeraldConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the eventherald binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Discord connection settings.
    pub discord: DiscordSettings,

    /// Announcement settings.
    pub announce: AnnounceSettings,
}

/// Discord connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordSettings {
    /// Bot token (supports `pass::` and `env::` prefixes).
    pub token: Option<String>,

    /// Guild whose scheduled events are announced.
    pub guild_id: Option<String>,

    /// Channel the announcements are posted to.
    pub channel_id: Option<String>,

    /// REST API base URL.
    pub api_base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            token: None,
            guild_id: None,
            channel_id: None,
            api_base_url: DiscordConfig::DEFAULT_API_BASE.to_string(),
            timeout_secs: DiscordConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Announcement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnounceSettings {
    /// How the eligibility window is computed.
    pub strategy: WindowStrategy,

    /// Description rendering.
    pub style: MessageStyle,

    /// Reference timezone as a UTC offset.
    pub timezone: String,

    /// Clock used for display times.
    pub time_format: TimeFormat,
}

impl Default for AnnounceSettings {
    fn default() -> Self {
        Self {
            strategy: WindowStrategy::default(),
            style: MessageStyle::default(),
            timezone: "+00:00".to_string(),
            time_format: TimeFormat::default(),
        }
    }
}

impl HeraldConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| CliError::config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventherald")
    }

    /// Applies command-line flags (and their environment variables) on top
    /// of the file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        let discord = &mut self.discord;
        override_with(&mut discord.token, &cli.token);
        override_with(&mut discord.guild_id, &cli.guild_id);
        override_with(&mut discord.channel_id, &cli.channel_id);

        let announce = &mut self.announce;
        if let Some(strategy) = cli.strategy {
            announce.strategy = strategy;
        }
        if let Some(style) = cli.style {
            announce.style = style;
        }
        if let Some(ref timezone) = cli.timezone {
            announce.timezone = timezone.clone();
        }
        if let Some(time_format) = cli.time_format {
            announce.time_format = time_format;
        }
    }

    /// Builds the run configuration, resolving the token reference.
    ///
    /// An `env::` reference to an unset variable leaves the token unset so
    /// the run reports it with the other missing values.
    pub fn to_run_config(&self) -> CliResult<RunConfig> {
        let token = match self.discord.token {
            Some(ref raw) => match secret::resolve(raw) {
                Ok(token) => Some(token),
                Err(SecretError::MissingEnv(var)) => {
                    warn!(var = %var, "token variable is not set");
                    None
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        };
        let timezone = parse_utc_offset(&self.announce.timezone)
            .map_err(|e| CliError::config(e.to_string()))?;

        Ok(RunConfig {
            token,
            guild_id: self.discord.guild_id.clone(),
            channel_id: self.discord.channel_id.clone(),
            strategy: self.announce.strategy,
            style: self.announce.style,
            timezone,
            time_format: self.announce.time_format,
        })
    }

    /// Builds the Discord client configuration.
    pub fn to_discord_config(&self) -> CliResult<DiscordConfig> {
        if self.discord.timeout_secs == 0 {
            return Err(CliError::config("discord.timeout_secs must be positive"));
        }
        let config = DiscordConfig::new(&self.discord.api_base_url).map_err(|e| {
            CliError::config(format!(
                "invalid discord.api_base_url '{}': {}",
                self.discord.api_base_url, e
            ))
        })?;
        Ok(config.with_timeout(Duration::from_secs(self.discord.timeout_secs)))
    }

    /// Returns a copy safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.discord.token.is_some() {
            copy.discord.token = Some(REDACTED.to_string());
        }
        copy
    }
}

fn override_with(value: &mut Option<String>, flag: &Option<String>) {
    if flag.is_some() {
        value.clone_from(flag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use eventherald_runner::RunError;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = HeraldConfig::default();
        assert!(config.discord.token.is_none());
        assert_eq!(config.discord.api_base_url, "https://discord.com/api/v10/");
        assert_eq!(config.discord.timeout_secs, 10);
        assert_eq!(config.announce.strategy, WindowStrategy::RollingOffset);
        assert_eq!(config.announce.style, MessageStyle::Quoted);
        assert!(HeraldConfig::default_path().ends_with("eventherald/config.toml"));
    }

    #[test]
    fn parse_full_file() {
        let toml_content = r#"
[discord]
token = "plain-token"
guild_id = "42"
channel_id = "7"
timeout_secs = 3

[announce]
strategy = "calendar_day"
style = "plain"
timezone = "-05:00"
time_format = "h12"
"#;
        let config: HeraldConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.discord.guild_id.as_deref(), Some("42"));
        assert_eq!(config.discord.timeout_secs, 3);
        assert_eq!(config.announce.strategy, WindowStrategy::CalendarDay);
        assert_eq!(config.announce.time_format, TimeFormat::H12);

        let run = config.to_run_config().unwrap();
        assert_eq!(run.token.as_deref(), Some("plain-token"));
        assert_eq!(run.timezone.local_minus_utc(), -5 * 3600);
        assert_eq!(run.style, MessageStyle::Plain);
        assert!(run.validate().is_ok());

        let discord = config.to_discord_config().unwrap();
        assert_eq!(discord.timeout, Duration::from_secs(3));
    }

    #[test]
    fn empty_file_is_default() {
        let config: HeraldConfig = toml::from_str("").unwrap();
        assert_eq!(config, HeraldConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[discord]\nguild_id = \"99\"").unwrap();

        let config = HeraldConfig::load_from(file.path()).unwrap();
        assert_eq!(config.discord.guild_id.as_deref(), Some("99"));
        assert!(config.discord.channel_id.is_none());
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = HeraldConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn load_from_invalid_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[announce]\nstrategy = \"weekly\"").unwrap();

        let err = HeraldConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn cli_flags_override_file() {
        let mut config: HeraldConfig = toml::from_str(
            r#"
[discord]
token = "file-token"
guild_id = "1"
channel_id = "2"
"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "eventherald",
            "--token",
            "flag-token",
            "--channel-id",
            "3",
            "--strategy",
            "calendar_day",
            "--timezone",
            "+02:00",
        ])
        .unwrap();
        config.apply_cli(&cli);

        assert_eq!(config.discord.token.as_deref(), Some("flag-token"));
        assert_eq!(config.discord.guild_id.as_deref(), Some("1"));
        assert_eq!(config.discord.channel_id.as_deref(), Some("3"));
        assert_eq!(config.announce.strategy, WindowStrategy::CalendarDay);
        assert_eq!(config.announce.timezone, "+02:00");
    }

    #[test]
    fn invalid_timezone_is_config_error() {
        let mut config = HeraldConfig::default();
        config.announce.timezone = "Europe/Paris".to_string();
        assert!(matches!(config.to_run_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_api_base_is_config_error() {
        let mut config = HeraldConfig::default();
        config.discord.api_base_url = "not a url".to_string();
        assert!(config.to_discord_config().is_err());

        let mut config = HeraldConfig::default();
        config.discord.timeout_secs = 0;
        assert!(config.to_discord_config().is_err());
    }

    #[test]
    fn token_reference_is_resolved() {
        unsafe {
            std::env::set_var("_EVENTHERALD_CONFIG_TEST_TOKEN", "resolved-token");
        }
        let mut config = HeraldConfig::default();
        config.discord.token = Some("env::_EVENTHERALD_CONFIG_TEST_TOKEN".to_string());

        let run = config.to_run_config().unwrap();
        assert_eq!(run.token.as_deref(), Some("resolved-token"));
        unsafe {
            std::env::remove_var("_EVENTHERALD_CONFIG_TEST_TOKEN");
        }
    }

    #[test]
    fn unset_token_variable_is_reported_as_missing() {
        let mut config = HeraldConfig::default();
        config.discord.token = Some("env::_EVENTHERALD_CONFIG_TEST_UNSET".to_string());
        config.discord.guild_id = Some("42".to_string());
        config.discord.channel_id = Some("7".to_string());

        let run = config.to_run_config().unwrap();
        assert!(run.token.is_none());
        match run.validate() {
            Err(RunError::Config { missing }) => assert_eq!(missing, vec!["token"]),
            other => panic!("expected a config error, got {:?}", other.err()),
        }
    }

    #[test]
    fn redacted_hides_token() {
        let mut config = HeraldConfig::default();
        config.discord.token = Some("secret".to_string());

        let dumped = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!dumped.contains("secret"));
        assert!(dumped.contains(REDACTED));
    }
}
