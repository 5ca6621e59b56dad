//! Users API - HTTP CRUD service over a PostgreSQL `users` table.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Environment configuration and constants
//! - **domain**: The user record
//! - **services**: Application use cases
//! - **infra**: Connection pool, readiness probe, schema, repository
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response wrappers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (also the default with no subcommand)
//! cargo run -- serve --port 3000
//!
//! # Wait for the database and create the schema
//! cargo run -- migrate
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{NewUser, User};
pub use errors::{AppError, AppResult, StartupError};
