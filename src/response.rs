//! Response helpers. Success bodies are the bare serialized records; errors are `{"error": ...}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

/// 201 with the created record.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// 200 with a JSON array of records, in the order given.
pub fn many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

pub fn error_body(message: &str) -> Value {
    serde_json::json!({ "error": message })
}
