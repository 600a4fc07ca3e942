//! GET/POST /users.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::models::{NewUser, User};
use crate::response::{created, many};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = User::all(&state.db).await?;
    Ok(many(users.iter().map(User::to_dict).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let (Some(username), Some(email)) = (body.str_field("username"), body.str_field("email")) else {
        return Err(AppError::BadRequest("Missing username or email".into()));
    };
    let user = User::insert(&state.db, &NewUser { username, email }).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");
    Ok(created(user.to_dict()))
}
