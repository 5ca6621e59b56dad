//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::DbErr;
use serde_json::Value;
use tower::ServiceExt;

use users_api::domain::{NewUser, User};
use users_api::errors::{AppError, AppResult};
use users_api::infra::{HealthCheck, UserRepository};
use users_api::services::UserManager;
use users_api::{create_router, AppState};

/// In-memory users table with SERIAL-like ids.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<BTreeMap<i32, User>>,
    next_id: Mutex<i32>,
}

impl InMemoryUsers {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

/// Mirror the store's cast of a text id to an integer.
fn cast_id(id: &str) -> AppResult<i32> {
    id.parse().map_err(|_| {
        AppError::from(DbErr::Custom(format!(
            "invalid input syntax for type integer: \"{}\"",
            id
        )))
    })
}

fn row(id: i32, user: NewUser) -> User {
    User {
        id,
        name: Some(user.name),
        email: Some(user.email),
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let id = cast_id(id)?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = row(*next_id, user);
        self.rows.lock().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, user: NewUser) -> AppResult<Option<User>> {
        let id = cast_id(id)?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|existing| {
            *existing = row(id, user);
            existing.clone()
        }))
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let id = cast_id(id)?;
        Ok(self.rows.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }
}

/// Health check with a fixed outcome.
pub struct StaticHealth(pub Option<String>);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> Result<(), DbErr> {
        match &self.0 {
            None => Ok(()),
            Some(message) => Err(DbErr::Custom(message.clone())),
        }
    }
}

/// Router over the given repository with a healthy store.
pub fn app_with(repo: Arc<InMemoryUsers>) -> Router {
    let service = Arc::new(UserManager::new(repo));
    create_router(AppState::new(service, Arc::new(StaticHealth(None))))
}

pub fn app() -> Router {
    app_with(Arc::new(InMemoryUsers::default()))
}

/// Raw response pieces.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
