//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Plain-text banner served on `/`
pub const LIVENESS_BANNER: &str = "users-api is alive. Use /api/users for the API.";

// =============================================================================
// Database
// =============================================================================

/// Default database host (the compose service name)
pub const DEFAULT_DB_HOST: &str = "postgres-db";

/// Default database port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default database name
pub const DEFAULT_DB_NAME: &str = "crud_db";

/// Default database user
pub const DEFAULT_DB_USER: &str = "postgres";

/// Default database password (for development)
pub const DEFAULT_DB_PASSWORD: &str = "postgres";

// =============================================================================
// Connection Pool
// =============================================================================

/// Upper bound on pooled connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Idle connections kept open
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 0;

/// How long a request waits for a pooled connection
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_MS: u64 = 5000;

// =============================================================================
// Startup Readiness
// =============================================================================

/// Total connectivity attempts before giving up (includes the first try)
pub const DEFAULT_DB_CONNECT_RETRIES: u32 = 10;

/// Delay between connectivity attempts in milliseconds
pub const DEFAULT_DB_CONNECT_RETRY_DELAY_MS: u64 = 2000;
