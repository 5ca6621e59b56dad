//! User repository backed by parameterized SQL.
//!
//! Every operation is exactly one statement with positional parameters. Path
//! ids arrive as raw strings and are bound as text; the store casts them, so
//! a malformed id surfaces as a store error rather than being rejected here.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Statement, Value,
};

use super::entities::UserEntity;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const LIST_USERS_SQL: &str = "SELECT id, name, email FROM users ORDER BY id";

const FIND_USER_SQL: &str = "SELECT id, name, email FROM users WHERE id = CAST($1 AS INTEGER)";

const INSERT_USER_SQL: &str =
    "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email";

const UPDATE_USER_SQL: &str = "UPDATE users SET name = $1, email = $2 \
     WHERE id = CAST($3 AS INTEGER) RETURNING id, name, email";

const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = CAST($1 AS INTEGER)";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ascending by id
    async fn list(&self) -> AppResult<Vec<User>>;

    /// User with the given raw path id, if any
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Insert a user and return the stored row
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Replace name and email; `None` when no row matched
    async fn update(&self, id: &str, user: NewUser) -> AppResult<Option<User>>;

    /// Delete by id, returning the number of rows removed
    async fn delete(&self, id: &str) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn statement<I>(sql: &str, values: I) -> Statement
where
    I: IntoIterator<Item = Value>,
{
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .from_raw_sql(statement(LIST_USERS_SQL, []))
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .from_raw_sql(statement(FIND_USER_SQL, [id.into()]))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let model = UserEntity::find()
            .from_raw_sql(statement(
                INSERT_USER_SQL,
                [user.name.into(), user.email.into()],
            ))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::internal("INSERT ... RETURNING produced no row"))?;

        Ok(User::from(model))
    }

    async fn update(&self, id: &str, user: NewUser) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .from_raw_sql(statement(
                UPDATE_USER_SQL,
                [user.name.into(), user.email.into(), id.into()],
            ))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = self
            .db
            .execute(statement(DELETE_USER_SQL, [id.into()]))
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Transaction};

    use super::*;
    use crate::infra::repositories::entities::UserModel;

    fn store_over(db: DatabaseConnection) -> UserStore {
        UserStore::new(Arc::new(db))
    }

    /// Statements the mock connection saw; the store must be the last owner.
    fn transaction_log(store: UserStore) -> Vec<Transaction> {
        Arc::try_unwrap(store.db)
            .ok()
            .expect("store is the only owner of the connection")
            .into_transaction_log()
    }

    fn model(id: i32, name: &str, email: &str) -> UserModel {
        UserModel {
            id,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn list_orders_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Ana", "ana@x.com"), model(2, "Bo", "bo@x.com")]])
            .into_connection();
        let store = store_over(db);

        let users = store.list().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(
            transaction_log(store),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                LIST_USERS_SQL,
                []
            )]
        );
    }

    #[tokio::test]
    async fn find_binds_raw_id_as_text() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<UserModel>::new()])
            .into_connection();
        let store = store_over(db);

        let found = store.find_by_id("42").await.unwrap();

        assert!(found.is_none());
        assert_eq!(
            transaction_log(store),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                FIND_USER_SQL,
                ["42".into()]
            )]
        );
    }

    #[tokio::test]
    async fn create_binds_name_then_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Ana", "ana@x.com")]])
            .into_connection();
        let store = store_over(db);

        let user = store.create(NewUser::new("Ana", "ana@x.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name.as_deref(), Some("Ana"));
        assert_eq!(
            transaction_log(store),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                INSERT_USER_SQL,
                ["Ana".into(), "ana@x.com".into()]
            )]
        );
    }

    #[tokio::test]
    async fn update_without_match_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<UserModel>::new()])
            .into_connection();
        let store = store_over(db);

        let updated = store
            .update("99", NewUser::new("Ana B", "ana@x.com"))
            .await
            .unwrap();

        assert!(updated.is_none());
        assert_eq!(
            transaction_log(store),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                UPDATE_USER_SQL,
                ["Ana B".into(), "ana@x.com".into(), "99".into()]
            )]
        );
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let store = store_over(db);

        assert_eq!(store.delete("1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn store_errors_become_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("invalid input syntax for type integer".into())])
            .into_connection();
        let store = store_over(db);

        let err = store.find_by_id("abc").await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn create_store_error_becomes_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("duplicate key value".into())])
            .into_connection();
        let store = store_over(db);

        let err = store
            .create(NewUser::new("Ana", "ana@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }
}
