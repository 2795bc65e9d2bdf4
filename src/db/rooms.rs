use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::amenities::Amenity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RoomKind {
    EntirePlace,
    PrivateRoom,
    SharedRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CategoryKind {
    Rooms,
    Experiences,
}

/// What a room looks like inside lists: wishlists, search results, amenity
/// back-references.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RoomSummary {
    pub pk: i64,
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: i64,
    pub address: String,
    pub pet_friendly: bool,
    pub kind: RoomKind,
    pub owner_id: i64,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub country: String,
    pub city: String,
    pub price: i64,
    pub address: String,
    pub pet_friendly: bool,
    pub kind: RoomKind,
    pub owner_id: i64,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub pk: i64,
    pub name: String,
    pub kind: CategoryKind,
}

pub(crate) const SUMMARY_COLUMNS: &str = "rooms.id AS pk,rooms.name,rooms.country,rooms.city,rooms.price";

pub async fn list(db_pool: &SqlitePool) -> Result<Vec<RoomSummary>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {SUMMARY_COLUMNS} FROM rooms ORDER BY rooms.id"))
        .fetch_all(db_pool)
        .await
}

pub async fn get(db_pool: &SqlitePool, id: i64) -> Result<Option<Room>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id,name,country,city,price,address,pet_friendly,kind,owner_id,category_id FROM rooms WHERE id=?",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await
}

pub async fn create(db_pool: &SqlitePool, room: &NewRoom) -> Result<Room, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO rooms (name,country,city,price,address,pet_friendly,kind,owner_id,category_id)
        VALUES (?,?,?,?,?,?,?,?,?)
        RETURNING id,name,country,city,price,address,pet_friendly,kind,owner_id,category_id
        "#,
    )
    .bind(&room.name)
    .bind(&room.country)
    .bind(&room.city)
    .bind(room.price)
    .bind(&room.address)
    .bind(room.pet_friendly)
    .bind(room.kind)
    .bind(room.owner_id)
    .bind(room.category_id)
    .fetch_one(db_pool)
    .await
}

/// Amenities of one room, by amenity pk.
pub async fn amenities(db_pool: &SqlitePool, room_id: i64) -> Result<Vec<Amenity>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT amenities.id AS pk,amenities.name,amenities.description
        FROM room_amenities
        JOIN amenities ON amenities.id=room_amenities.amenity_id
        WHERE room_amenities.room_id=?
        ORDER BY amenities.id
        "#,
    )
    .bind(room_id)
    .fetch_all(db_pool)
    .await
}

/// Links an amenity to a room. Linking an existing pair does nothing.
pub async fn add_amenity(db_pool: &SqlitePool, room_id: i64, amenity_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO room_amenities (room_id,amenity_id) VALUES (?,?) ON CONFLICT DO NOTHING")
        .bind(room_id)
        .bind(amenity_id)
        .execute(db_pool)
        .await?;
    Ok(())
}

pub async fn categories(db_pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as("SELECT id AS pk,name,kind FROM categories ORDER BY id")
        .fetch_all(db_pool)
        .await
}

pub async fn category(db_pool: &SqlitePool, id: i64) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT id AS pk,name,kind FROM categories WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn create_category(db_pool: &SqlitePool, name: &str, kind: CategoryKind) -> Result<Category, sqlx::Error> {
    sqlx::query_as("INSERT INTO categories (name,kind) VALUES (?,?) RETURNING id AS pk,name,kind")
        .bind(name)
        .bind(kind)
        .fetch_one(db_pool)
        .await
}
