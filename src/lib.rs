//! Blog API: JSON REST backend for users and posts over PostgreSQL or SQLite.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use app::{create_app, create_app_from, App};
pub use config::Config;
pub use error::{AppError, ConfigError};
pub use migration::{Migrate, Migration};
pub use models::{NewPost, NewUser, Post, User};
pub use response::error_body;
pub use routes::{api_routes, common_routes};
pub use state::AppState;
pub use store::Database;
