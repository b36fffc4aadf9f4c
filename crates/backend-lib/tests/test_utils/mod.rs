//! Test utilities for the listings HTTP tests
//!
//! Builds a full router over a fresh in-memory SQLite store and offers small
//! request/response helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use backend_lib::{
    config::{PasswordHashSettings, Settings},
    create_router,
    storage::{SqliteStorage, Storage},
    AppState,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

/// Settings with a cheap scrypt cost and no seeded principals
pub fn test_settings() -> Settings {
    Settings {
        password_hash: PasswordHashSettings { log_n: 4, r: 8, p: 1 },
        principals: Vec::new(),
        ..Settings::default()
    }
}

/// Router and state over an empty in-memory database
pub async fn setup_test_app() -> (Router, Arc<AppState<SqliteStorage>>) {
    let storage = SqliteStorage::in_memory()
        .await
        .expect("Failed to open in-memory database");
    setup_with(storage, test_settings())
}

pub fn setup_with<S: Storage + 'static>(
    storage: S,
    settings: Settings,
) -> (Router, Arc<AppState<S>>) {
    let state = Arc::new(AppState::new(storage, settings).expect("Failed to create AppState"));
    (create_router(Arc::clone(&state)), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub fn json_request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub fn form_request(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// `name=value` pair of the session cookie set by `response`, if any
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("LISTINGS_SESSION="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn register(app: &Router, username: &str, password: &str) -> Response<Body> {
    let body = serde_json::json!({ "username": username, "password": password });
    send(app, json_request("POST", "/api/login/register", Some(body), None)).await
}

pub async fn login(app: &Router, username: &str, password: &str) -> Response<Body> {
    let body = serde_json::json!({ "username": username, "password": password });
    send(app, json_request("POST", "/api/login", Some(body), None)).await
}

/// Register, log in and return the session cookie
pub async fn signed_in(app: &Router, username: &str, password: &str) -> String {
    register(app, username, password).await;
    let response = login(app, username, password).await;
    session_cookie(&response).expect("login sets a session cookie")
}
