//! Migrate command - Schema initialization without serving.

use crate::config::Config;
use crate::errors::StartupError;

use super::prepare_database;

/// Execute the migrate command
pub async fn execute(config: Config) -> Result<(), StartupError> {
    tracing::info!("Running schema initialization...");

    prepare_database(&config).await?;

    tracing::info!("Schema initialization completed successfully");
    Ok(())
}
