// Reservation handlers
//
// - POST /api/reservations - place a hold (user id comes from the token)
// - POST /api/reservations/{reservation_id}/confirm - settle a hold

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use ticketing::{
    BookingResponse, ConfirmReservationCommand, ConfirmReservationUseCase, ReservationResponse,
    ReserveTicketsCommand, ReserveTicketsUseCase,
};

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// Request body for placing a hold
#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub event_id: Uuid,
    pub category: String,
    pub qty: u32,
}

/// Request body for settling a hold
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub payment_ok: bool,
}

/// Handler for POST /api/reservations
pub async fn reserve_handler(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(request): Json<ReserveRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), Response> {
    let use_case = ReserveTicketsUseCase::new(
        state.categories(),
        state.reservations(),
        state.stock(),
        state.publisher(),
        state.gate(),
        state.reservation_ttl(),
        state.persist_sync(),
    );

    let reservation = use_case
        .execute(ReserveTicketsCommand {
            user_id: ctx.user_id,
            event_id: request.event_id,
            category: request.category,
            qty: request.qty,
        })
        .await
        .map_err(|error| AppError::from(error).into_response())?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Handler for POST /api/reservations/{reservation_id}/confirm
pub async fn confirm_handler(
    State(state): State<AppState>,
    CurrentUser(_ctx): CurrentUser,
    Path(reservation_id): Path<Uuid>,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<BookingResponse>, Response> {
    let use_case = ConfirmReservationUseCase::new(
        state.stock(),
        state.reservations(),
        state.bookings(),
        state.publisher(),
    );

    let booking = use_case
        .execute(ConfirmReservationCommand {
            reservation_id,
            payment_ok: request.payment_ok,
        })
        .await
        .map_err(|error| AppError::from(error).into_response())?;

    Ok(Json(booking))
}
