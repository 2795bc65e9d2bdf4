use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::rooms::{RoomSummary, SUMMARY_COLUMNS};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Amenity {
    pub pk: i64,
    pub name: String,
    pub description: Option<String>,
}

pub async fn list(db_pool: &SqlitePool) -> Result<Vec<Amenity>, sqlx::Error> {
    sqlx::query_as("SELECT id AS pk,name,description FROM amenities ORDER BY id")
        .fetch_all(db_pool)
        .await
}

pub async fn get(db_pool: &SqlitePool, id: i64) -> Result<Option<Amenity>, sqlx::Error> {
    sqlx::query_as("SELECT id AS pk,name,description FROM amenities WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn create(db_pool: &SqlitePool, name: &str, description: Option<&str>) -> Result<Amenity, sqlx::Error> {
    sqlx::query_as("INSERT INTO amenities (name,description) VALUES (?,?) RETURNING id AS pk,name,description")
        .bind(name)
        .bind(description)
        .fetch_one(db_pool)
        .await
}

/// Every room offering this amenity (`amenity.rooms`), by room pk.
pub async fn rooms(db_pool: &SqlitePool, amenity_id: i64) -> Result<Vec<RoomSummary>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM room_amenities
        JOIN rooms ON rooms.id=room_amenities.room_id
        WHERE room_amenities.amenity_id=?
        ORDER BY rooms.id
        "#
    ))
    .bind(amenity_id)
    .fetch_all(db_pool)
    .await
}
