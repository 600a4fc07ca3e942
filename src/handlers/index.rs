use axum::Json;
use serde_json::{json, Value};

pub const GREETING: &str = "Welcome to the blog API";

pub async fn index() -> Json<Value> {
    Json(json!({ "message": GREETING }))
}
