use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::SqlitePool;

use crate::{db::users, AppError};

/// Header carrying the caller's user pk, set by whatever sits in front of us.
pub const USER_ID: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(user_id) = parts
            .headers
            .get(USER_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
        else {
            return Err(AppError::Unauthenticated);
        };

        let db_pool = SqlitePool::from_ref(state);
        let Some(user) = users::get(&db_pool, user_id).await? else {
            tracing::debug!(user_id, "unknown user");
            return Err(AppError::Unauthenticated);
        };

        Ok(CurrentUser { id: user.pk, username: user.username })
    }
}
