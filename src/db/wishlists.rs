use std::collections::HashMap;

use sqlx::{FromRow, SqlitePool};

use super::rooms::{RoomSummary, SUMMARY_COLUMNS};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Wishlist {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

#[derive(FromRow)]
struct WishlistRoom {
    wishlist_id: i64,
    #[sqlx(flatten)]
    room: RoomSummary,
}

pub async fn list_for_user(db_pool: &SqlitePool, user_id: i64) -> Result<Vec<Wishlist>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,user_id FROM wishlists WHERE user_id=? ORDER BY id")
        .bind(user_id)
        .fetch_all(db_pool)
        .await
}

/// A wishlist owned by someone else is reported as absent.
pub async fn get_for_user(db_pool: &SqlitePool, id: i64, user_id: i64) -> Result<Option<Wishlist>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,user_id FROM wishlists WHERE id=? AND user_id=?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(db_pool)
        .await
}

pub async fn create(db_pool: &SqlitePool, user_id: i64, name: &str) -> Result<Wishlist, sqlx::Error> {
    sqlx::query_as("INSERT INTO wishlists (name,user_id) VALUES (?,?) RETURNING id,name,user_id")
        .bind(name)
        .bind(user_id)
        .fetch_one(db_pool)
        .await
}

pub async fn rename(db_pool: &SqlitePool, id: i64, name: &str) -> Result<Wishlist, sqlx::Error> {
    sqlx::query_as("UPDATE wishlists SET name=? WHERE id=? RETURNING id,name,user_id")
        .bind(name)
        .bind(id)
        .fetch_one(db_pool)
        .await
}

pub async fn delete(db_pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM wishlists WHERE id=?")
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn rooms(db_pool: &SqlitePool, wishlist_id: i64) -> Result<Vec<RoomSummary>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
        FROM wishlists_rooms
        JOIN rooms ON rooms.id=wishlists_rooms.room_id
        WHERE wishlists_rooms.wishlist_id=?
        ORDER BY rooms.id
        "#
    ))
    .bind(wishlist_id)
    .fetch_all(db_pool)
    .await
}

/// Rooms of every wishlist a user owns in one query, keyed by wishlist id.
/// Wishlists without rooms have no entry.
pub async fn rooms_for_user(db_pool: &SqlitePool, user_id: i64) -> Result<HashMap<i64, Vec<RoomSummary>>, sqlx::Error> {
    let rows: Vec<WishlistRoom> = sqlx::query_as(&format!(
        r#"
        SELECT wishlists_rooms.wishlist_id,{SUMMARY_COLUMNS}
        FROM wishlists_rooms
        JOIN wishlists ON wishlists.id=wishlists_rooms.wishlist_id
        JOIN rooms ON rooms.id=wishlists_rooms.room_id
        WHERE wishlists.user_id=?
        ORDER BY wishlists_rooms.wishlist_id,rooms.id
        "#
    ))
    .bind(user_id)
    .fetch_all(db_pool)
    .await?;

    let mut by_wishlist: HashMap<i64, Vec<RoomSummary>> = HashMap::new();
    for WishlistRoom { wishlist_id, room } in rows {
        by_wishlist.entry(wishlist_id).or_default().push(room);
    }
    Ok(by_wishlist)
}

/// Adds the room if it is missing, removes it if it is there. Returns whether
/// the room is in the wishlist afterwards.
pub async fn toggle_room(db_pool: &SqlitePool, wishlist_id: i64, room_id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = db_pool.begin().await?;

    let removed = sqlx::query("DELETE FROM wishlists_rooms WHERE wishlist_id=? AND room_id=?")
        .bind(wishlist_id)
        .bind(room_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    if !removed {
        sqlx::query("INSERT INTO wishlists_rooms (wishlist_id,room_id) VALUES (?,?)")
            .bind(wishlist_id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(!removed)
}
