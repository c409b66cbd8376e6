mod event_routes;
mod reservation_routes;

use axum::{middleware, Router};

use crate::middleware::{auth_middleware, rate_limit_middleware};
use crate::state::AppState;

/// All authenticated API routes. The auth layer runs first, then the
/// per-user rate limit.
pub fn api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(event_routes::routes())
        .merge(reservation_routes::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
