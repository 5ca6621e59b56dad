//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, HealthCheck, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Store reachability, used by `/health`
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Wire the production services on top of one database pool.
    pub fn from_database(database: Database) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));

        Self {
            user_service: Arc::new(UserManager::new(repo)),
            health: Arc::new(database),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            user_service,
            health,
        }
    }
}
