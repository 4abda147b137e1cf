//! Shared helpers for integration tests.
//!
//! Builds a real router over a fresh in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, round-tripping the session cookie the way a
//! browser would.

#![allow(dead_code)] // Not every test binary uses every helper
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code

use axum::Router;
use axum::body::Body;
use eventsphere_core::{MemoryStore, RegistrationService, SessionStore};
use eventsphere_web::{AppState, build_router};
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt as _;

/// Build an app over a fresh store with the sample accounts seeded
/// (`manager` / `student`, password `password`).
pub async fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    store.seed_sample_data().await.unwrap();
    let sessions = Arc::new(SessionStore::new());
    let registration = Arc::new(RegistrationService::new(Arc::clone(&store)));
    build_router(AppState::new(
        store,
        sessions,
        registration,
        chrono::Duration::hours(24),
    ))
}

/// Send one request and return status, headers and parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, headers, body)
}

/// Log in and return the `name=value` cookie pair for replay on later
/// requests.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, headers, body) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": username, "password": password })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("login response should set the session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// Register an account through the public endpoint. Password is
/// `secret123`.
pub async fn register_user(app: &Router, username: &str, role: &str) -> Value {
    let (status, _, body) = send(
        app,
        "POST",
        "/api/users",
        Some(json!({
            "username": username,
            "password": "secret123",
            "email": format!("{username}@example.com"),
            "firstName": "Test",
            "lastName": "User",
            "role": role,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "user creation failed: {body}");
    body
}

/// Create an event as the given (already logged-in) manager cookie.
/// Returns the created event body.
pub async fn create_event(app: &Router, cookie: &str, payload: Value) -> Value {
    let (status, _, body) = send(app, "POST", "/api/events", Some(payload), Some(cookie)).await;
    assert_eq!(status, StatusCode::CREATED, "event creation failed: {body}");
    body
}

/// A minimal valid event payload, one week in the future.
pub fn event_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "location": "Main Hall",
        "eventDate": (chrono::Utc::now() + chrono::Duration::days(7)).to_rfc3339(),
        "category": "technical",
        "type": "free",
        "capacity": 30,
    })
}
