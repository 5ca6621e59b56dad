//! Users API - Application entry point
//!
//! CLI-based entry point that dispatches to the serve and migrate commands.

use std::error::Error;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_api::{
    cli::{Cli, Commands, ServeArgs},
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Loads `.env` before anything reads the environment
    let cli = Cli::load();

    // Verbose mode sets debug level
    init_tracing(cli.verbose);

    let config = Config::from_env();
    tracing::debug!(database = ?config.database, "Configuration loaded");

    let result = match cli.command {
        Some(Commands::Serve(args)) => commands::serve::execute(args, config).await,
        Some(Commands::Migrate) => commands::migrate::execute(config).await,
        None => commands::serve::execute(ServeArgs::from_env(), config).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", error_chain(&e));
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

/// `outer: inner: root` rendering of an error and its sources.
fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
