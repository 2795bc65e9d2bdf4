mod detail;
mod list;
mod serializer;
mod toggle;

use axum::{routing::{get, put}, Router};

use crate::AppState;

pub use serializer::{WishlistCreate, WishlistResponse, WishlistUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::wishlists).post(list::new_wishlist))
        .route(
            "/{pk}",
            get(detail::wishlist)
                .put(detail::update_wishlist)
                .delete(detail::delete_wishlist),
        )
        .route("/{pk}/rooms/{room_pk}", put(toggle::toggle_room))
}
