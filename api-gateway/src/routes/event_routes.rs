// Event administration routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::event_handlers::{
    availability_handler, create_category_handler, create_event_handler,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event_handler))
        .route("/events/{event_id}/categories", post(create_category_handler))
        .route("/events/{event_id}/availability", get(availability_handler))
}
