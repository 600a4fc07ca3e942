//! Resource routes. Method dispatch per path is left to the router; other methods get 405.

use crate::handlers::{create_post, create_user, index, list_posts, list_users};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/users", get(list_users).post(create_user))
        .route("/posts", get(list_posts).post(create_post))
        .with_state(state)
}
