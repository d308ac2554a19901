//! Event sources and message channels.
//!
//! This crate provides the abstraction layer between a run and the remote
//! service it talks to:
//!
//! - [`EventSource`] - Lists the scheduled events of a guild
//! - [`MessageChannel`] - Posts an announcement to a channel
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//!              ┌─────────────────┐
//!              │   Discord API   │
//!              └────────┬────────┘
//!                       │
//!                       ▼
//!              ┌─────────────────┐
//!              │  DiscordClient  │
//!              └────────┬────────┘
//!                       │
//!        EventSource    │    MessageChannel
//!           ┌───────────┴───────────┐
//!           ▼                       ▼
//!     ┌────────────┐         ┌──────────────┐
//!     │ Vec<Event> │         │ post_message │
//!     └────────────┘         └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eventherald_providers::{EventSource, ProviderResult};
//!
//! async fn count_events(source: &dyn EventSource, guild: &str, token: &str) -> ProviderResult<usize> {
//!     Ok(source.fetch_events(guild, token).await?.len())
//! }
//! ```

#[cfg(feature = "discord")]
pub mod discord;
pub mod error;
pub mod source;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use source::{BoxFuture, ErrorSource, EventSource, MessageChannel, StaticSource};
