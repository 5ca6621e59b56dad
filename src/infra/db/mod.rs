//! Database connection pool and startup initialization.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, SqlxPostgresConnector, Statement,
};

use crate::config::{Config, DatabaseSource, PoolSettings};
use crate::errors::StartupError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub mod readiness;
pub mod schema;

pub use readiness::{wait_for_ready, Backoff, RetryPolicy, Sleeper, TokioSleeper};
pub use schema::ensure_schema;

/// Trivial round trip used by the prober and `/health`.
const PING_SQL: &str = "SELECT 1";

/// Store reachability check.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Run one trivial round trip against the store.
    async fn ping(&self) -> Result<(), DbErr>;
}

/// Database wrapper for connection management
///
/// Cheap to clone; every clone shares one pool.
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Build the connection pool from configuration.
    ///
    /// The pool is lazy: no connection is opened until the first query, so a
    /// store that is still starting does not fail construction.
    pub fn connect(config: &Config) -> Result<Self, StartupError> {
        let options = connect_options(&config.database)?;
        let pool = pool_options(&config.pool).connect_lazy_with(options);

        tracing::debug!(
            max_connections = config.pool.max_connections,
            "Database pool configured"
        );

        Ok(Self::from_connection(
            SqlxPostgresConnector::from_sqlx_postgres_pool(pool),
        ))
    }

    /// Wrap an existing connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Get a shared handle to the database connection.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Check database connectivity by executing a simple query.
    ///
    /// Failures are logged here, so a dropped or refused connection shows up
    /// once per round trip whoever asked for it.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                DbBackend::Postgres,
                PING_SQL.to_string(),
            ))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Database round trip failed");
                e
            })?;
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for Database {
    async fn ping(&self) -> Result<(), DbErr> {
        Database::ping(self).await
    }
}

/// Translate the configured source into driver connect options.
fn connect_options(source: &DatabaseSource) -> Result<PgConnectOptions, StartupError> {
    match source {
        // Managed databases: always encrypt, never verify the server certificate
        DatabaseSource::Url(url) => PgConnectOptions::from_str(url)
            .map(|options| options.ssl_mode(PgSslMode::Require))
            .map_err(|e| StartupError::Config(format!("invalid DATABASE_URL: {}", e))),
        DatabaseSource::Fields(fields) => Ok(PgConnectOptions::new()
            .host(&fields.host)
            .port(fields.port)
            .database(&fields.name)
            .username(&fields.user)
            .password(fields.password())),
    }
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .after_connect(|_conn, meta| {
            Box::pin(async move {
                tracing::debug!(age = ?meta.age, "Opened pooled database connection");
                Ok(())
            })
        })
}
