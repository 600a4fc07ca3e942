mod common;

use axum::http::{Method, StatusCode};
use common::{count, create_user, get, post, send, test_app};
use serde_json::json;

#[tokio::test]
async fn root_greets() {
    let app = test_app().await;
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to the blog API" }));
}

#[tokio::test]
async fn list_users_starts_empty() {
    let app = test_app().await;
    let (status, body) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_user_is_listed() {
    let app = test_app().await;
    let (status, created) = post(&app, "/users", json!({ "username": "alice", "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["username"], "alice");
    assert_eq!(created["email"], "a@x.com");
    assert!(created["id"].is_i64());

    let (status, body) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0], created);
}

#[tokio::test]
async fn users_are_listed_in_creation_order() {
    let app = test_app().await;
    create_user(&app, "alice", "a@x.com").await;
    create_user(&app, "bob", "b@x.com").await;
    let (_, body) = get(&app, "/users").await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[tokio::test]
async fn create_user_missing_email_is_rejected() {
    let app = test_app().await;
    let (status, body) = post(&app, "/users", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing username or email" }));
    assert_eq!(count(&app, "users").await, 0);
}

#[tokio::test]
async fn create_user_with_bad_body_is_rejected() {
    let app = test_app().await;
    for raw in ["", "not json", "[1,2]", r#"{"username": 5, "email": "a@x.com"}"#] {
        let (status, body) = send(&app, Method::POST, "/users", Some(raw)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw:?}");
        assert_eq!(body["error"], "Missing username or email");
    }
    assert_eq!(count(&app, "users").await, 0);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = test_app().await;
    create_user(&app, "alice", "a@x.com").await;
    let (status, body) = post(&app, "/users", json!({ "username": "alice", "email": "other@x.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
    assert_eq!(count(&app, "users").await, 1);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = test_app().await;
    create_user(&app, "alice", "a@x.com").await;
    let (status, body) = post(&app, "/users", json!({ "username": "bob", "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Username or email already exists" }));
    assert_eq!(count(&app, "users").await, 1);
}

#[tokio::test]
async fn each_creation_adds_exactly_one_record() {
    let app = test_app().await;
    for i in 0..3 {
        let before = count(&app, "users").await;
        create_user(&app, &format!("user{i}"), &format!("u{i}@x.com")).await;
        assert_eq!(count(&app, "users").await, before + 1);
    }
    let user_id = create_user(&app, "writer", "w@x.com").await;
    for i in 0..3 {
        let before = count(&app, "posts").await;
        let (status, _) = post(
            &app,
            "/posts",
            json!({ "title": format!("t{i}"), "content": "c", "user_id": user_id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(count(&app, "posts").await, before + 1);
    }
}

#[tokio::test]
async fn list_posts_starts_empty() {
    let app = test_app().await;
    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_post_is_listed_with_owner() {
    let app = test_app().await;
    let user_id = create_user(&app, "alice", "a@x.com").await;
    let (status, created) = post(
        &app,
        "/posts",
        json!({ "title": "Hello", "content": "First post", "user_id": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Hello");
    assert_eq!(created["user_id"], user_id);

    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0], created);
    assert_eq!(posts[0]["user_id"], user_id);
}

#[tokio::test]
async fn post_accepts_numeric_string_user_id() {
    let app = test_app().await;
    let user_id = create_user(&app, "alice", "a@x.com").await;
    let (status, created) = post(
        &app,
        "/posts",
        json!({ "title": "Hi", "content": "c", "user_id": user_id.to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], user_id);
}

#[tokio::test]
async fn post_accepts_whole_float_user_id() {
    let app = test_app().await;
    let user_id = create_user(&app, "alice", "a@x.com").await;
    let (status, created) = post(
        &app,
        "/posts",
        json!({ "title": "Hi", "content": "c", "user_id": user_id as f64 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], user_id);

    let (status, _) = post(&app, "/posts", json!({ "title": "Hi", "content": "c", "user_id": 1.5 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(count(&app, "posts").await, 1);
}

#[tokio::test]
async fn post_for_unknown_user_is_not_found() {
    let app = test_app().await;
    let (status, body) = post(&app, "/posts", json!({ "title": "Hi", "content": "c", "user_id": 999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));

    let (status, _) = post(&app, "/posts", json!({ "title": "Hi", "content": "c", "user_id": "abc" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(count(&app, "posts").await, 0);
}

#[tokio::test]
async fn post_missing_fields_is_rejected() {
    let app = test_app().await;
    let user_id = create_user(&app, "alice", "a@x.com").await;
    for body in [
        json!({ "content": "c", "user_id": user_id }),
        json!({ "title": "t", "user_id": user_id }),
        json!({ "title": "t", "content": "c" }),
        json!({ "title": "t", "content": "c", "user_id": null }),
    ] {
        let (status, resp) = post(&app, "/posts", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({ "error": "Missing title, content or user_id" }));
    }
    assert_eq!(count(&app, "posts").await, 0);
}

#[tokio::test]
async fn reads_never_mutate() {
    let app = test_app().await;
    let user_id = create_user(&app, "alice", "a@x.com").await;
    post(&app, "/posts", json!({ "title": "t", "content": "c", "user_id": user_id })).await;

    let users_before = count(&app, "users").await;
    let posts_before = count(&app, "posts").await;
    for uri in ["/", "/users", "/posts", "/users", "/posts"] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(count(&app, "users").await, users_before);
    assert_eq!(count(&app, "posts").await, posts_before);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = test_app().await;
    let (status, _) = send(&app, Method::DELETE, "/users", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(&app, Method::PUT, "/posts", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_ready_and_version() {
    let app = test_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = get(&app, "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "blog-api");
}

#[tokio::test]
async fn ready_reports_unavailable_store() {
    let app = test_app().await;
    app.db().close().await;
    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "status": "degraded", "database": "unavailable" }));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = test_app().await;
    let big = "x".repeat(app.config().body_limit_bytes + 1);
    let (status, _) = post(&app, "/users", json!({ "username": big, "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(count(&app, "users").await, 0);
}
