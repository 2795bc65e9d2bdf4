mod amenities;
mod list;
mod room;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::rooms).post(room::new_room))
        .route("/{pk}", get(room::room))
        .route("/amenities", get(amenities::amenities).post(amenities::new_amenity))
        .route("/amenities/{pk}", get(amenities::amenity))
        .route("/amenities/{pk}/rooms", get(amenities::amenity_rooms))
}
