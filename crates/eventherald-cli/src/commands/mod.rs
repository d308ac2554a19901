//! Subcommand implementations.

pub mod announce;
pub mod config;
