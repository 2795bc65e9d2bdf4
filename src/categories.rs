use axum::{debug_handler, extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::rooms::{self, Category, CategoryKind},
    extract::AppJson,
    validate_name, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct NewCategory {
    name: String,
    kind: CategoryKind,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(categories).post(new_category))
}

#[debug_handler]
#[tracing::instrument(skip_all)]
async fn categories(State(db_pool): State<SqlitePool>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(rooms::categories(&db_pool).await?))
}

#[debug_handler]
#[tracing::instrument(skip_all)]
async fn new_category(
    State(db_pool): State<SqlitePool>,
    AppJson(NewCategory { name, kind }): AppJson<NewCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let name = validate_name(&name)?;
    let category = rooms::create_category(&db_pool, name, kind).await?;
    tracing::info!(pk = category.pk, "added category {}", category.name);

    Ok((StatusCode::CREATED, Json(category)))
}
