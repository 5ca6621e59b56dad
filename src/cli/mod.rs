//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server (the default)
//! - `migrate` - Wait for the database and create the schema

pub mod args;

pub use args::{Cli, Commands, ServeArgs};
