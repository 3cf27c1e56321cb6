//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `grant-role` - Grant a role to a user

pub mod args;

pub use args::{Cli, Commands};
