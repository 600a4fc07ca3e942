//! Migration binding: versioned schema changes tracked in `_schema_migrations`.
//! Version 1 is derived from the registered entity definitions; later versions are appended explicitly.

use crate::error::{AppError, ConfigError};
use crate::sql::Dialect;
use crate::store::Database;
use std::collections::HashSet;

pub const MIGRATIONS_TABLE: &str = "_schema_migrations";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    pub statements: Vec<String>,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, statements: Vec<String>) -> Self {
        Self {
            version,
            description: description.into(),
            statements,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Migrate {
    db: Database,
    migrations: Vec<Migration>,
}

impl Migrate {
    /// Migration history starting with the initial tables of `db`'s schema.
    pub fn new(db: Database) -> Self {
        let initial = Migration::new(
            1,
            "create initial tables",
            db.schema().create_statements(db.dialect()),
        );
        Self {
            db,
            migrations: vec![initial],
        }
    }

    /// Append a migration; versions must be strictly increasing.
    pub fn push(mut self, migration: Migration) -> Result<Self, ConfigError> {
        let last = self.migrations.last().map(|m| m.version).unwrap_or(0);
        if migration.version <= last {
            return Err(ConfigError::Validation(format!(
                "migration version {} must be greater than {}",
                migration.version, last
            )));
        }
        self.migrations.push(migration);
        Ok(self)
    }

    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    async fn ensure_table(&self) -> Result<(), AppError> {
        let version_type = match self.db.dialect() {
            Dialect::Postgres => "BIGINT",
            Dialect::Sqlite => "INTEGER",
        };
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version {} PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TEXT NOT NULL
            )
            "#,
            MIGRATIONS_TABLE, version_type
        );
        sqlx::query(&ddl).execute(self.db.pool()).await?;
        Ok(())
    }

    async fn applied(&self) -> Result<HashSet<i64>, AppError> {
        self.ensure_table().await?;
        let sql = format!("SELECT version FROM {}", MIGRATIONS_TABLE);
        let rows: Vec<i64> = sqlx::query_scalar(&sql).fetch_all(self.db.pool()).await?;
        Ok(rows.into_iter().collect())
    }

    /// Highest applied version, `None` on a fresh database.
    pub async fn current(&self) -> Result<Option<i64>, AppError> {
        Ok(self.applied().await?.into_iter().max())
    }

    /// Known migrations not yet applied, in version order.
    pub async fn pending(&self) -> Result<Vec<&Migration>, AppError> {
        let applied = self.applied().await?;
        Ok(self
            .migrations
            .iter()
            .filter(|m| !applied.contains(&m.version))
            .collect())
    }

    /// Apply pending migrations in order, each in its own transaction. Returns the versions applied.
    pub async fn upgrade(&self) -> Result<Vec<i64>, AppError> {
        let pending: Vec<Migration> = self.pending().await?.into_iter().cloned().collect();
        let insert = format!(
            "INSERT INTO {} (version, description, applied_at) VALUES ($1, $2, $3)",
            MIGRATIONS_TABLE
        );
        let mut done = Vec::with_capacity(pending.len());
        for m in pending {
            let mut tx = self.db.pool().begin().await?;
            for sql in &m.statements {
                sqlx::query(sql).execute(&mut *tx).await?;
            }
            sqlx::query(&insert)
                .bind(m.version)
                .bind(m.description.clone())
                .bind(chrono::Utc::now().to_rfc3339())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            tracing::info!(version = m.version, description = %m.description, "migration applied");
            done.push(m.version);
        }
        Ok(done)
    }
}
