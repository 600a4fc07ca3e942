use crate::error::AppError;
use crate::sql::{ColumnDef, ColumnType, Entity, TableDef};
use crate::store::Database;
use serde_json::{json, Value};

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl Entity for User {
    const TABLE: &'static str = "users";

    fn table() -> TableDef {
        TableDef::new(
            Self::TABLE,
            vec![
                ColumnDef::serial("id"),
                ColumnDef::new("username", ColumnType::Varchar(80)).unique(),
                ColumnDef::new("email", ColumnType::Varchar(120)).unique(),
            ],
        )
    }
}

const SELECT_ALL: &str = r#"SELECT "id", "username", "email" FROM "users" ORDER BY "id""#;
const SELECT_BY_ID: &str = r#"SELECT "id", "username", "email" FROM "users" WHERE "id" = $1"#;
const INSERT: &str =
    r#"INSERT INTO "users" ("username", "email") VALUES ($1, $2) RETURNING "id", "username", "email""#;

impl User {
    pub fn to_dict(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
        })
    }

    pub async fn all(db: &Database) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, User>(SELECT_ALL).fetch_all(db.pool()).await?;
        Ok(rows)
    }

    pub async fn get(db: &Database, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, User>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(db.pool())
            .await?;
        Ok(row)
    }

    /// Insert and commit. A taken username or email is reported as a conflict.
    pub async fn insert(db: &Database, new: &NewUser) -> Result<User, AppError> {
        let conflict = |e: sqlx::Error| AppError::from_write(e, "Username or email already exists");
        let mut tx = db.pool().begin().await?;
        let user = sqlx::query_as::<_, User>(INSERT)
            .bind(new.username.clone())
            .bind(new.email.clone())
            .fetch_one(&mut *tx)
            .await
            .map_err(conflict)?;
        tx.commit().await.map_err(conflict)?;
        Ok(user)
    }
}
