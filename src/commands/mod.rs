//! Commands module - CLI command implementations.

pub mod migrate;
pub mod serve;

use crate::config::Config;
use crate::errors::StartupError;
use crate::infra::db::{ensure_schema, wait_for_ready, RetryPolicy, TokioSleeper};
use crate::infra::Database;

/// Build the pool, wait for the store to answer, then create the schema.
///
/// Shared by `serve` and `migrate`; nothing is served until this returns.
pub(crate) async fn prepare_database(config: &Config) -> Result<Database, StartupError> {
    let db = Database::connect(config)?;

    let policy = RetryPolicy::from(config.readiness);
    wait_for_ready(&db, &policy, &TokioSleeper).await?;
    ensure_schema(db.connection()).await?;

    Ok(db)
}
