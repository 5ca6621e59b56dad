//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_DB_ACQUIRE_TIMEOUT_MS, DEFAULT_DB_CONNECT_RETRIES, DEFAULT_DB_CONNECT_RETRY_DELAY_MS,
    DEFAULT_DB_HOST, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS, DEFAULT_DB_NAME,
    DEFAULT_DB_PASSWORD, DEFAULT_DB_PORT, DEFAULT_DB_USER,
};

/// Where the connection pool gets its connection parameters from.
///
/// Exactly one source is active. `DATABASE_URL` wins when it is set.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// Full connection URI; connections always use TLS without certificate checks.
    Url(String),
    /// Discrete connection fields.
    Fields(DatabaseFields),
}

/// Discrete connection fields (`DB_HOST`, `DB_PORT`, ...).
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseFields {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    password: String,
}

impl DatabaseFields {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            name: name.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Get the password used to authenticate.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for DatabaseFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseFields")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for DatabaseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseSource::Url(_) => f.debug_tuple("Url").field(&"[REDACTED]").finish(),
            DatabaseSource::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
        }
    }
}

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            min_connections: DEFAULT_DB_MIN_CONNECTIONS,
            acquire_timeout: Duration::from_millis(DEFAULT_DB_ACQUIRE_TIMEOUT_MS),
        }
    }
}

/// Startup connectivity retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessSettings {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_DB_CONNECT_RETRIES,
            delay: Duration::from_millis(DEFAULT_DB_CONNECT_RETRY_DELAY_MS),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseSource,
    pub pool: PoolSettings,
    pub readiness: ReadinessSettings,
}

impl Config {
    /// Load configuration from environment variables (and `.env` when present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. Numbers that fail to parse fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseSource::Url(url),
            None => DatabaseSource::Fields(DatabaseFields {
                host: var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                port: parse(var("DB_PORT")).unwrap_or(DEFAULT_DB_PORT),
                name: var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
                user: var("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
                password: var("DB_PASSWORD").unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string()),
            }),
        };

        let pool = PoolSettings {
            max_connections: parse(var("DB_MAX_CONNECTIONS"))
                .filter(|max: &u32| *max > 0)
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            min_connections: parse(var("DB_MIN_CONNECTIONS")).unwrap_or(DEFAULT_DB_MIN_CONNECTIONS),
            acquire_timeout: Duration::from_millis(
                parse(var("DB_ACQUIRE_TIMEOUT_MS")).unwrap_or(DEFAULT_DB_ACQUIRE_TIMEOUT_MS),
            ),
        };

        let readiness = ReadinessSettings {
            max_attempts: parse(var("DB_CONNECT_RETRIES")).unwrap_or(DEFAULT_DB_CONNECT_RETRIES),
            delay: Duration::from_millis(
                parse(var("DB_CONNECT_RETRY_DELAY_MS")).unwrap_or(DEFAULT_DB_CONNECT_RETRY_DELAY_MS),
            ),
        };

        Self {
            database,
            pool,
            readiness,
        }
    }
}

fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|value| value.trim().parse().ok())
}
