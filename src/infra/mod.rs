//! Infrastructure layer - External systems integration
//!
//! Database pool, startup readiness, schema and repositories.

pub mod db;
pub mod repositories;

pub use db::{Database, HealthCheck};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use db::MockHealthCheck;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
