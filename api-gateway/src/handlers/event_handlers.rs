// Event administration handlers
//
// - POST /api/events - create an event (admin)
// - POST /api/events/{event_id}/categories - create a category (admin)
// - GET  /api/events/{event_id}/availability - live per-category stock

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use common::ErrorResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use ticketing::{
    AvailabilityResponse, CategoryResponse, CreateCategoryCommand, CreateCategoryUseCase,
    CreateEventCommand, CreateEventUseCase, EventResponse, GetAvailabilityUseCase,
};

use crate::auth::ROLE_ADMIN;
use crate::error::AppError;
use crate::extractors::{AuthenticatedUser, CurrentUser};
use crate::state::AppState;

/// Request body for creating an event
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub total_stock: u32,
    pub price: Decimal,
}

fn require_admin(ctx: &AuthenticatedUser) -> Result<(), Response> {
    if ctx.role != ROLE_ADMIN {
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            ErrorResponse::new("FORBIDDEN", "Requires admin role"),
        )
        .into_response());
    }
    Ok(())
}

/// Handler for POST /api/events
pub async fn create_event_handler(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), Response> {
    require_admin(&ctx)?;

    let use_case = CreateEventUseCase::new(state.events());
    let event = use_case
        .execute(CreateEventCommand {
            name: request.name,
            date: request.date,
        })
        .await
        .map_err(|error| AppError::from(error).into_response())?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Handler for POST /api/events/{event_id}/categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), Response> {
    require_admin(&ctx)?;

    let use_case =
        CreateCategoryUseCase::new(state.events(), state.categories(), state.stock());
    let category = use_case
        .execute(CreateCategoryCommand {
            event_id,
            name: request.name,
            total_stock: request.total_stock,
            price: request.price,
        })
        .await
        .map_err(|error| AppError::from(error).into_response())?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for GET /api/events/{event_id}/availability
pub async fn availability_handler(
    State(state): State<AppState>,
    CurrentUser(_ctx): CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<AvailabilityResponse>, Response> {
    let use_case =
        GetAvailabilityUseCase::new(state.events(), state.categories(), state.stock());
    let availability = use_case
        .execute(event_id)
        .await
        .map_err(|error| AppError::from(error).into_response())?;

    Ok(Json(availability))
}
