use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::{
    db::{rooms, wishlists},
    extract::AppPath,
    session::CurrentUser,
    AppError, AppResult, AppState,
};

use super::{detail::owned_wishlist, WishlistResponse};

#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(pk = pk, room_pk = room_pk, user_id = user.id))]
pub(crate) async fn toggle_room(
    State(db_pool): State<SqlitePool>,
    AppPath((pk, room_pk)): AppPath<(i64, i64)>,
    user: CurrentUser,
) -> AppResult<Json<WishlistResponse>> {
    let wishlist = owned_wishlist(&db_pool, pk, &user).await?;

    if rooms::get(&db_pool, room_pk).await?.is_none() {
        return Err(AppError::not_found("room", room_pk));
    }

    let added = wishlists::toggle_room(&db_pool, wishlist.id, room_pk).await?;
    tracing::debug!(added, "toggled room");

    Ok(Json(WishlistResponse::load(&db_pool, wishlist).await?))
}
