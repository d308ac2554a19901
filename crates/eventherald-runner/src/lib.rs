//! One announcement run: validate, fetch, select, dispatch.
//!
//! This crate wires the pure pieces of `eventherald-core` to the remote
//! capabilities of `eventherald-providers`:
//! - [`RunConfig`] carries credentials and deployment options
//! - [`NotificationDispatcher`] posts one announcement and records its outcome
//! - [`run`] performs a complete run at a given instant
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use eventherald_core::TracingSink;
//! use eventherald_providers::discord::{DiscordClient, DiscordConfig};
//! use eventherald_runner::{RunConfig, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DiscordClient::new(DiscordConfig::default())?;
//!     let config = RunConfig::new(token, guild_id, channel_id);
//!     let result = run(Utc::now(), &config, &client, &client, &TracingSink).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

mod config;
mod coordinator;
mod dispatch;
mod error;

pub use config::{Credentials, RunConfig};
pub use coordinator::run;
pub use dispatch::NotificationDispatcher;
pub use error::{RunError, RunnerResult};
