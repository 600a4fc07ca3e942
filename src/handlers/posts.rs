//! GET/POST /posts.

use crate::error::AppError;
use crate::extractors::{id_value, JsonObject};
use crate::models::{NewPost, Post, User};
use crate::response::{created, many};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = Post::all(&state.db).await?;
    Ok(many(posts.iter().map(Post::to_dict).collect()))
}

pub async fn create_post(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let (Some(title), Some(content), Some(user_id)) = (
        body.str_field("title"),
        body.str_field("content"),
        body.field("user_id"),
    ) else {
        return Err(AppError::BadRequest("Missing title, content or user_id".into()));
    };

    // an id that cannot be an integer cannot name a user either
    let user = match id_value(user_id) {
        Some(id) => User::get(&state.db, id).await?,
        None => None,
    };
    let user = user.ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let post = Post::insert(
        &state.db,
        &NewPost {
            title,
            content,
            user_id: user.id,
        },
    )
    .await?;
    tracing::info!(post_id = post.id, user_id = post.user_id, "post created");
    Ok(created(post.to_dict()))
}
