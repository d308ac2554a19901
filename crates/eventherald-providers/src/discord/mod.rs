//! Discord REST implementation of [`EventSource`] and [`MessageChannel`].
//!
//! - Events come from `GET /guilds/{guild.id}/scheduled-events`
//! - Announcements go to `POST /channels/{channel.id}/messages`
//!
//! Both calls authenticate with a bot token (`Authorization: Bot <token>`).
//!
//! # Example
//!
//! ```ignore
//! use eventherald_providers::discord::{DiscordClient, DiscordConfig};
//! use eventherald_providers::{EventSource, MessageChannel};
//!
//! let client = DiscordClient::new(DiscordConfig::default())?;
//! let events = client.fetch_events("81384788765712384", &token).await?;
//! client.post_message("381870553235193857", &token, "hello").await?;
//! ```
//!
//! [`EventSource`]: crate::EventSource
//! [`MessageChannel`]: crate::MessageChannel

mod client;
mod config;

pub use client::DiscordClient;
pub use config::DiscordConfig;
