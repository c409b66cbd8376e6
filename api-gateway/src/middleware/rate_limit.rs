// Per-user rate limiting
//
// Runs after authentication so the limit is keyed by user id rather than
// by address, which keeps buyers behind one NAT from starving each other.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;

use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Authentication required")),
        )
            .into_response();
    };

    if state.rate_limiter().check_key(&user.user_id).is_err() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse::new("RATE_LIMITED", "Too many requests")),
        )
            .into_response();
    }

    next.run(request).await
}
