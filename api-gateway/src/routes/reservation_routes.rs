// Reservation routes

use axum::{routing::post, Router};

use crate::handlers::reservation_handlers::{confirm_handler, reserve_handler};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(reserve_handler))
        .route(
            "/reservations/{reservation_id}/confirm",
            post(confirm_handler),
        )
}
