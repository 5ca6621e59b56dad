//! Serve command - Starts the HTTP server.

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::StartupError;

use super::prepare_database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> Result<(), StartupError> {
    tracing::info!("Starting server...");

    let db = prepare_database(&config).await?;
    let app = create_router(AppState::from_database(db));

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)?;

    Ok(())
}
