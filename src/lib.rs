pub mod appresult;
pub mod categories;
pub mod config;
pub mod db;
pub mod extract;
pub mod rooms;
pub mod session;
pub mod users;
pub mod wishlists;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};

pub const MAX_NAME_LEN: usize = 150;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/rooms", rooms::router())
        .nest("/users", users::router())
        .nest("/wishlists", wishlists::router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Trims a user-supplied name and checks it is 1 to [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!("name must be at most {MAX_NAME_LEN} characters")));
    }
    Ok(name)
}
