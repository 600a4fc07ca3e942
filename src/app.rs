//! Application factory: settings, persistence and migration bindings, routes.
//! Each call builds an independent instance; nothing is shared across instances.

use crate::config::Config;
use crate::error::AppError;
use crate::migration::Migrate;
use crate::models;
use crate::routes::{api_routes, common_routes};
use crate::sql::redact;
use crate::state::AppState;
use crate::store::Database;
use axum::Router;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub struct App {
    config: Arc<Config>,
    db: Database,
    migrate: Migrate,
    router: Router,
}

/// Build an app from environment settings, with `overrides` shallow-merged on top.
pub fn create_app(overrides: Option<Map<String, Value>>) -> Result<App, AppError> {
    create_app_from(Config::from_env()?, overrides)
}

/// Build an app from `base` settings, with `overrides` shallow-merged on top.
pub fn create_app_from(base: Config, overrides: Option<Map<String, Value>>) -> Result<App, AppError> {
    let config = match overrides {
        Some(o) if !o.is_empty() => base.merge(&o)?,
        _ => base,
    };
    let config = Arc::new(config);

    // define the schema first, then bind it
    let schema = models::schema()?;
    let db = Database::connect_lazy(&config, schema)?;
    let migrate = Migrate::new(db.clone());

    let state = AppState {
        db: db.clone(),
        config: config.clone(),
    };
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(RequestBodyLimitLayer::new(config.body_limit_bytes)),
        );

    Ok(App {
        config,
        db,
        migrate,
        router,
    })
}

impl App {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn migrate(&self) -> &Migrate {
        &self.migrate
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until Ctrl-C, then close the pool.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            database = %redact(&self.config.database_url),
            "listening"
        );
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        self.db.close().await;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
