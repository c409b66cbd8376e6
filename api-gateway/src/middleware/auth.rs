// Authentication middleware for JWT validation
//
// Extracts the Bearer token from the Authorization header, validates it,
// and injects the authenticated identity into request extensions for the
// CurrentUser extractor.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;

use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // 1. Extract the token from the Authorization header
    let token = match extract_bearer_token(&request) {
        Ok(token) => token,
        Err(response) => return response,
    };

    // 2. Validate the token and read the claims
    let Some(claims) = state.token_verifier().verify(&token) else {
        return unauthorized_response("Invalid or expired token");
    };

    // 3. Make the identity available to handlers
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        role: claims.role,
    });

    next.run(request).await
}

/// Extracts the Bearer token from the Authorization header.
fn extract_bearer_token(request: &Request<Body>) -> Result<String, Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match auth_header {
        Some(header) => {
            if let Some(token) = header.strip_prefix("Bearer ") {
                if token.trim().is_empty() {
                    Err(unauthorized_response("Token is empty"))
                } else {
                    Ok(token.trim().to_string())
                }
            } else {
                Err(unauthorized_response(
                    "Invalid authorization scheme, expected Bearer",
                ))
            }
        }
        None => Err(unauthorized_response("Missing authorization header")),
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::unauthorized(message)),
    )
        .into_response()
}
