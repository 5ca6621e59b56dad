//! User service - Handles user-related use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, User};
use crate::errors::AppResult;
use crate::infra::UserRepository;

/// User service trait for dependency injection.
///
/// Lookups that match nothing are `Ok(None)`, not errors.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users ordered by id
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by raw path id
    async fn get_user(&self, id: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    /// Replace a user's name and email
    async fn update_user(&self, id: &str, user: NewUser) -> AppResult<Option<User>>;

    /// Delete a user; deleting a missing id is not an error
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let created = self.repo.create(user).await?;
        tracing::debug!(id = created.id, "User created");
        Ok(created)
    }

    async fn update_user(&self, id: &str, user: NewUser) -> AppResult<Option<User>> {
        let updated = self.repo.update(id, user).await?;
        if updated.is_none() {
            tracing::debug!(id, "Update matched no user");
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        let removed = self.repo.delete(id).await?;
        tracing::debug!(id, removed, "User delete executed");
        Ok(())
    }
}
