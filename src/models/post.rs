use crate::error::AppError;
use crate::models::User;
use crate::sql::{ColumnDef, ColumnType, Entity, TableDef};
use crate::store::Database;
use serde_json::{json, Value};

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

/// Post about to be created. `user_id` must name an existing user.
#[derive(Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl Entity for Post {
    const TABLE: &'static str = "posts";

    fn table() -> TableDef {
        TableDef::new(
            Self::TABLE,
            vec![
                ColumnDef::serial("id"),
                ColumnDef::new("title", ColumnType::Varchar(200)),
                ColumnDef::new("content", ColumnType::Text),
                ColumnDef::new("user_id", ColumnType::BigInt).references(User::TABLE, "id"),
            ],
        )
    }
}

const SELECT_ALL: &str =
    r#"SELECT "id", "title", "content", "user_id" FROM "posts" ORDER BY "id""#;
const INSERT: &str = r#"INSERT INTO "posts" ("title", "content", "user_id") VALUES ($1, $2, $3) RETURNING "id", "title", "content", "user_id""#;

impl Post {
    pub fn to_dict(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "content": self.content,
            "user_id": self.user_id,
        })
    }

    pub async fn all(db: &Database) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, Post>(SELECT_ALL).fetch_all(db.pool()).await?;
        Ok(rows)
    }

    pub async fn insert(db: &Database, new: &NewPost) -> Result<Post, AppError> {
        let mut tx = db.pool().begin().await?;
        let post = sqlx::query_as::<_, Post>(INSERT)
            .bind(new.title.clone())
            .bind(new.content.clone())
            .bind(new.user_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(post)
    }
}
