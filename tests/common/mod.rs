#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use blog_api::{create_app_from, App, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Fresh app over its own in-memory SQLite database with tables created.
pub async fn test_app() -> App {
    let overrides = match json!({ "database_url": "sqlite::memory:" }) {
        Value::Object(m) => m,
        _ => unreachable!(),
    };
    let app = create_app_from(Config::default(), Some(overrides)).expect("app");
    app.db().create_all().await.expect("create tables");
    app
}

pub async fn send(app: &App, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header(header::CONTENT_TYPE, "application/json");
    }
    let req = req
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("request");
    let resp = app.router().oneshot(req).await.expect("response");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get(app: &App, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &App, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

pub async fn count(app: &App, table: &str) -> i64 {
    app.db().count(table).await.expect("count")
}

/// Creates a user through the API and returns its id.
pub async fn create_user(app: &App, username: &str, email: &str) -> i64 {
    let (status, body) = post(app, "/users", json!({ "username": username, "email": email })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().expect("id")
}
