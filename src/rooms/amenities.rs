use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{amenities::{self, Amenity}, rooms::RoomSummary},
    extract::{AppJson, AppPath},
    validate_name, AppError, AppResult,
};

#[derive(Debug, Deserialize)]
pub(crate) struct NewAmenity {
    name: String,
    description: Option<String>,
}

#[debug_handler]
#[tracing::instrument(skip_all)]
pub(crate) async fn amenities(State(db_pool): State<SqlitePool>) -> AppResult<Json<Vec<Amenity>>> {
    Ok(Json(amenities::list(&db_pool).await?))
}

#[debug_handler]
#[tracing::instrument(skip_all)]
pub(crate) async fn new_amenity(
    State(db_pool): State<SqlitePool>,
    AppJson(NewAmenity { name, description }): AppJson<NewAmenity>,
) -> AppResult<(StatusCode, Json<Amenity>)> {
    let name = validate_name(&name)?;
    let amenity = amenities::create(&db_pool, name, description.as_deref()).await?;
    tracing::info!(pk = amenity.pk, "added amenity {}", amenity.name);

    Ok((StatusCode::CREATED, Json(amenity)))
}

#[debug_handler]
#[tracing::instrument(skip_all, fields(pk = pk))]
pub(crate) async fn amenity(
    State(db_pool): State<SqlitePool>,
    AppPath(pk): AppPath<i64>,
) -> AppResult<Json<Amenity>> {
    amenities::get(&db_pool, pk)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("amenity", pk))
}

/// Rooms that offer the amenity.
#[debug_handler]
#[tracing::instrument(skip_all, fields(pk = pk))]
pub(crate) async fn amenity_rooms(
    State(db_pool): State<SqlitePool>,
    AppPath(pk): AppPath<i64>,
) -> AppResult<Json<Vec<RoomSummary>>> {
    if amenities::get(&db_pool, pk).await?.is_none() {
        return Err(AppError::not_found("amenity", pk));
    }

    Ok(Json(amenities::rooms(&db_pool, pk).await?))
}
