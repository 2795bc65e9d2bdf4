use axum::{debug_handler, extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::users::{self, User},
    extract::AppJson,
    validate_name, AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct SignUp {
    username: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(sign_up))
}

#[debug_handler]
#[tracing::instrument(skip_all)]
async fn sign_up(
    State(db_pool): State<SqlitePool>,
    AppJson(SignUp { username }): AppJson<SignUp>,
) -> AppResult<(StatusCode, Json<User>)> {
    let username = validate_name(&username)?;
    match users::create(&db_pool, username).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(AppError::BadRequest(format!("username {username} is taken")))
        }
        Err(err) => Err(err.into()),
    }
}
