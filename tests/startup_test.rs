//! Startup behavior against stores that are unreachable or real.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::send;
use users_api::config::Config;
use users_api::infra::db::{ensure_schema, wait_for_ready, RetryPolicy, TokioSleeper};
use users_api::infra::Database;
use users_api::{create_router, AppState, StartupError};

/// Config pointing at a port nothing listens on.
fn unreachable_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DB_HOST", "127.0.0.1"),
        ("DB_PORT", "1"),
        ("DB_ACQUIRE_TIMEOUT_MS", "500"),
    ]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
}

#[tokio::test]
async fn test_pool_construction_does_not_touch_the_store() {
    assert!(Database::connect(&unreachable_config()).is_ok());
}

#[tokio::test]
async fn test_prober_gives_up_on_unreachable_store() {
    let db = Database::connect(&unreachable_config()).unwrap();
    let policy = RetryPolicy::new(2, Duration::from_millis(10));

    let err = wait_for_ready(&db, &policy, &TokioSleeper).await.unwrap_err();

    assert!(matches!(err, StartupError::Unavailable { attempts: 2, .. }));
}

#[tokio::test]
async fn test_health_reports_error_for_unreachable_store() {
    let db = Database::connect(&unreachable_config()).unwrap();
    let app = create_router(AppState::from_database(db));

    let res = send(&app, Method::GET, "/health", None).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json()["database"], "error");
    assert!(res.json()["message"].is_string());
}

/// Full round trip against the database named by the environment.
#[tokio::test]
#[ignore = "requires database"]
async fn test_lifecycle_against_real_database() {
    let config = Config::from_env();
    let db = Database::connect(&config).unwrap();
    wait_for_ready(&db, &RetryPolicy::from(config.readiness), &TokioSleeper)
        .await
        .unwrap();
    ensure_schema(db.connection()).await.unwrap();
    // Second run must be a no-op
    ensure_schema(db.connection()).await.unwrap();

    let app = create_router(AppState::from_database(db));

    let res = send(
        &app,
        Method::POST,
        "/api/users",
        Some(r#"{"name":"Ana","email":"ana@x.com"}"#),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let id = res.json()["id"].as_i64().unwrap();
    let uri = format!("/api/users/{}", id);

    let res = send(
        &app,
        Method::PUT,
        &uri,
        Some(r#"{"name":"Ana B","email":"ana@x.com"}"#),
    )
    .await;
    assert_eq!(res.json(), json!({"id": id, "name": "Ana B", "email": "ana@x.com"}));

    let res = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = send(&app, Method::GET, &uri, None).await;
    assert_eq!(res.json(), json!({}));

    let res = send(&app, Method::GET, "/health", None).await;
    assert_eq!(res.json(), json!({"database": "ok"}));
}
