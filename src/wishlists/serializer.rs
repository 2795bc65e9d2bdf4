//! JSON shapes for wishlists.
//!
//! Reads go out as [`WishlistResponse`]. Writes come in as [`WishlistCreate`]
//! and [`WishlistUpdate`], which only know about `name`: room membership is
//! changed through the toggle endpoint and nothing else, so a `rooms` key in
//! a request body is dropped during deserialization.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{rooms::RoomSummary, wishlists::{self, Wishlist}},
    AppResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WishlistResponse {
    pub pk: i64,
    pub name: String,
    pub rooms: Vec<RoomSummary>,
}

#[derive(Debug, Deserialize)]
pub struct WishlistCreate {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WishlistUpdate {
    pub name: Option<String>,
}

impl WishlistResponse {
    pub fn new(wishlist: Wishlist, rooms: Vec<RoomSummary>) -> Self {
        WishlistResponse {
            pk: wishlist.id,
            name: wishlist.name,
            rooms,
        }
    }

    pub async fn load(db_pool: &SqlitePool, wishlist: Wishlist) -> AppResult<Self> {
        let rooms = wishlists::rooms(db_pool, wishlist.id).await?;
        Ok(Self::new(wishlist, rooms))
    }

    /// Serializes every wishlist of one user with a single rooms query.
    pub async fn load_for_user(db_pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Self>> {
        let lists = wishlists::list_for_user(db_pool, user_id).await?;
        let mut rooms = wishlists::rooms_for_user(db_pool, user_id).await?;

        Ok(lists
            .into_iter()
            .map(|wishlist| {
                let rooms = rooms.remove(&wishlist.id).unwrap_or_default();
                Self::new(wishlist, rooms)
            })
            .collect())
    }
}
