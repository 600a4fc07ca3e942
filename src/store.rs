//! Persistence binding: pool, dialect and schema for one application instance.

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::sql::{is_memory_url, quoted, redact, Dialect, Schema};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Database {
    pool: AnyPool,
    dialect: Dialect,
    schema: Arc<Schema>,
}

impl Database {
    /// Bind `schema` to the store named by `config.database_url`. The pool connects lazily,
    /// so nothing touches the network or filesystem until the first query.
    pub fn connect_lazy(config: &Config, schema: Schema) -> Result<Self, AppError> {
        let dialect = Dialect::from_url(&config.database_url)?;
        sqlx::any::install_default_drivers();

        let mut options = AnyPoolOptions::new().max_connections(config.max_connections);
        if is_memory_url(&config.database_url) {
            // every connection would get its own empty database
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options.connect_lazy(&config.database_url)?;
        tracing::debug!(url = %redact(&config.database_url), ?dialect, "database bound");
        Ok(Self {
            pool,
            dialect,
            schema: Arc::new(schema),
        })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Create every registered table that does not exist yet.
    pub async fn create_all(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for sql in self.schema.create_statements(self.dialect) {
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Drop every registered table, dependents first.
    pub async fn drop_all(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for sql in self.schema.drop_statements() {
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Row count of a registered table.
    pub async fn count(&self, table: &str) -> Result<i64, AppError> {
        let table = self.schema.table(table).ok_or_else(|| ConfigError::MissingReference {
            kind: "table",
            id: table.to_string(),
        })?;
        let sql = format!("SELECT COUNT(*) FROM {}", quoted(table.name));
        let n: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(n)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
