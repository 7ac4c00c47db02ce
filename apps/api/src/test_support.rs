//! Helpers for driving the real router against an in-memory database.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::assistant::{JobAssistant, LlmProvider};
use crate::auth::USER_ID_HEADER;
use crate::config::Config;
use crate::db::run_migrations;
use crate::routes::build_router;
use crate::state::AppState;

/// A single long-lived connection, so every query sees the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn test_config() -> Config {
    Config {
        app_env: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        log_level: "debug".to_string(),
        log_dir: None,
        llm_provider: "placeholder".to_string(),
        llm_api_key: None,
        llm_model: "test-model".to_string(),
        llm_api_url: "http://127.0.0.1:1/v1/messages".to_string(),
    }
}

pub async fn test_app() -> (Router, AppState) {
    test_app_with(JobAssistant::new(LlmProvider::Placeholder, None)).await
}

pub async fn test_app_with(assistant: JobAssistant) -> (Router, AppState) {
    let state = AppState {
        db: test_pool().await,
        config: Arc::new(test_config()),
        assistant,
    };
    (build_router(state.clone()), state)
}

/// Sends one request. Empty response bodies come back as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn create_user(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({"email": email, "full_name": "Test User"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

pub async fn analyze(app: &Router, user_id: Option<i64>, resume_text: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/resume/analyze",
        None,
        Some(json!({"user_id": user_id, "resume_text": resume_text})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

pub async fn answer(
    app: &Router,
    user_id: Option<i64>,
    resume_analysis_id: Option<i64>,
    question: &str,
) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/generate/answer",
        None,
        Some(json!({
            "user_id": user_id,
            "resume_analysis_id": resume_analysis_id,
            "question": question,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}
