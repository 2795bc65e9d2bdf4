use axum::{debug_handler, extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::{db::wishlists, extract::AppJson, session::CurrentUser, validate_name, AppResult, AppState};

use super::{WishlistCreate, WishlistResponse};

#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn wishlists(
    State(db_pool): State<SqlitePool>,
    user: CurrentUser,
) -> AppResult<Json<Vec<WishlistResponse>>> {
    Ok(Json(WishlistResponse::load_for_user(&db_pool, user.id).await?))
}

#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub(crate) async fn new_wishlist(
    State(db_pool): State<SqlitePool>,
    user: CurrentUser,
    AppJson(WishlistCreate { name }): AppJson<WishlistCreate>,
) -> AppResult<(StatusCode, Json<WishlistResponse>)> {
    let name = validate_name(&name)?;
    let wishlist = wishlists::create(&db_pool, user.id, name).await?;
    tracing::info!(pk = wishlist.id, "@{} created wishlist {}", user.username, wishlist.name);

    Ok((StatusCode::CREATED, Json(WishlistResponse::new(wishlist, Vec::new()))))
}
