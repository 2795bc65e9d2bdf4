use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub pk: i64,
    pub username: String,
}

pub async fn get(db_pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT id AS pk,username FROM users WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn create(db_pool: &SqlitePool, username: &str) -> Result<User, sqlx::Error> {
    tracing::info!("adding user @{username}");
    sqlx::query_as("INSERT INTO users (username) VALUES (?) RETURNING id AS pk,username")
        .bind(username)
        .fetch_one(db_pool)
        .await
}
