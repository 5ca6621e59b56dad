//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::ffi::OsString;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Users API - CRUD over a PostgreSQL users table
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `serve` with environment-derived arguments
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse the process arguments with `.env` already loaded.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Load `.env` into the environment, then parse `args`.
    ///
    /// Flags with `env` fallbacks only see variables present at parse time.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dotenvy::dotenv().ok();
        Self::parse_from(args)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Wait for the database and create the schema, then exit
    Migrate,
}

/// Arguments for the serve command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "PORT")]
    pub port: u16,
}

impl ServeArgs {
    /// Address string handed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ServeArgs {
    /// Arguments as if `serve` were given with no flags: `HOST`/`PORT`, then defaults.
    pub fn from_env() -> Self {
        Self::parse_from(["serve"])
    }
}
