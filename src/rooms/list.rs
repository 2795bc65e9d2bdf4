use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::{db::rooms::{self, RoomSummary}, AppResult};

#[debug_handler]
#[tracing::instrument(skip_all)]
pub(crate) async fn rooms(State(db_pool): State<SqlitePool>) -> AppResult<Json<Vec<RoomSummary>>> {
    Ok(Json(rooms::list(&db_pool).await?))
}
