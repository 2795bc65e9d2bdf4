use axum::{debug_handler, extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::{
    db::wishlists::{self, Wishlist},
    extract::{AppJson, AppPath},
    session::CurrentUser,
    validate_name, AppError, AppResult, AppState,
};

use super::{WishlistResponse, WishlistUpdate};

pub(crate) async fn owned_wishlist(db_pool: &SqlitePool, pk: i64, user: &CurrentUser) -> AppResult<Wishlist> {
    wishlists::get_for_user(db_pool, pk, user.id)
        .await?
        .ok_or(AppError::not_found("wishlist", pk))
}

#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(pk = pk, user_id = user.id))]
pub(crate) async fn wishlist(
    State(db_pool): State<SqlitePool>,
    AppPath(pk): AppPath<i64>,
    user: CurrentUser,
) -> AppResult<Json<WishlistResponse>> {
    let wishlist = owned_wishlist(&db_pool, pk, &user).await?;
    Ok(Json(WishlistResponse::load(&db_pool, wishlist).await?))
}

#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(pk = pk, user_id = user.id))]
pub(crate) async fn update_wishlist(
    State(db_pool): State<SqlitePool>,
    AppPath(pk): AppPath<i64>,
    user: CurrentUser,
    AppJson(WishlistUpdate { name }): AppJson<WishlistUpdate>,
) -> AppResult<Json<WishlistResponse>> {
    let mut wishlist = owned_wishlist(&db_pool, pk, &user).await?;

    if let Some(name) = name {
        let name = validate_name(&name)?;
        wishlist = wishlists::rename(&db_pool, wishlist.id, name).await?;
    }

    Ok(Json(WishlistResponse::load(&db_pool, wishlist).await?))
}

#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, fields(pk = pk, user_id = user.id))]
pub(crate) async fn delete_wishlist(
    State(db_pool): State<SqlitePool>,
    AppPath(pk): AppPath<i64>,
    user: CurrentUser,
) -> AppResult<StatusCode> {
    let wishlist = owned_wishlist(&db_pool, pk, &user).await?;
    wishlists::delete(&db_pool, wishlist.id).await?;
    tracing::info!("@{} deleted wishlist {}", user.username, wishlist.name);

    Ok(StatusCode::NO_CONTENT)
}
