//! Schema initialization.

use sea_orm::ConnectionTrait;

use crate::errors::StartupError;

/// Idempotent definition of the only table the service owns.
pub const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name TEXT,
    email TEXT
)";

/// Create the users table if it does not exist yet.
///
/// Safe to run on every start.
pub async fn ensure_schema<C>(db: &C) -> Result<(), StartupError>
where
    C: ConnectionTrait,
{
    db.execute_unprepared(CREATE_USERS_TABLE)
        .await
        .map_err(StartupError::Schema)?;

    tracing::info!("Users table ready");
    Ok(())
}
