// API Gateway error handling
//
// Maps ticketing domain errors to HTTP responses with a uniform JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;
use ticketing::TicketingError;

/// Unified error type for the gateway.
///
/// # Error Mapping
///
/// | Domain Error | HTTP Status | Error Code |
/// |-------------|-------------|------------|
/// | InvalidInput | 400 | VALIDATION_ERROR |
/// | EventNotFound / CategoryNotFound / ReservationNotFound / BookingNotFound | 404 | *_NOT_FOUND |
/// | CategoryAlreadyExists | 409 | CATEGORY_ALREADY_EXISTS |
/// | OutOfStock | 409 | OUT_OF_STOCK |
/// | QueueFull | 429 | QUEUE_FULL |
/// | PaymentFailed | 402 | PAYMENT_FAILED |
/// | DeadlineExceeded | 504 | DEADLINE_EXCEEDED |
/// | everything else | 500 | INTERNAL_ERROR |
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    response: ErrorResponse,
}

impl AppError {
    /// Creates a new AppError with the given status code and error response.
    pub fn new(status: StatusCode, response: ErrorResponse) -> Self {
        Self { status, response }
    }

    /// Returns the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns a reference to the error response.
    pub fn response(&self) -> &ErrorResponse {
        &self.response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<TicketingError> for AppError {
    fn from(err: TicketingError) -> Self {
        let (status, response) = match &err {
            // 400 Bad Request - caller bugs
            TicketingError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(*message),
            ),
            TicketingError::InvalidReservationStatusValue => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error("Invalid reservation status"),
            ),

            // 404 Not Found - unknown domain objects
            TicketingError::EventNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("EVENT_NOT_FOUND", format!("Event not found: {}", id)),
            ),
            TicketingError::CategoryNotFound { event_id, category } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(
                    "CATEGORY_NOT_FOUND",
                    format!("Category '{}' not found for event {}", category, event_id),
                ),
            ),
            TicketingError::ReservationNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(
                    "RESERVATION_NOT_FOUND",
                    format!("Reservation not found: {}", id),
                ),
            ),
            TicketingError::BookingNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(
                    "BOOKING_NOT_FOUND",
                    format!("No booking found for reservation: {}", id),
                ),
            ),

            // 409 Conflict - duplicates and race losses
            TicketingError::CategoryAlreadyExists(name) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "CATEGORY_ALREADY_EXISTS",
                    format!("Category '{}' already exists for this event", name),
                ),
            ),
            TicketingError::OutOfStock => (
                StatusCode::CONFLICT,
                ErrorResponse::new("OUT_OF_STOCK", "Out of stock"),
            ),
            TicketingError::ReservationFinalized(id) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "RESERVATION_FINALIZED",
                    format!("Reservation already finalized: {}", id),
                ),
            ),

            // 429 Too Many Requests - shed by the admission gate
            TicketingError::QueueFull => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new("QUEUE_FULL", "Queue is full, try again shortly"),
            ),

            // 402 Payment Required
            TicketingError::PaymentFailed(id) => (
                StatusCode::PAYMENT_REQUIRED,
                ErrorResponse::new(
                    "PAYMENT_FAILED",
                    format!("Payment failed for reservation {}", id),
                ),
            ),

            // 504 Gateway Timeout - deadline elapsed inside the gate
            TicketingError::DeadlineExceeded => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::new("DEADLINE_EXCEEDED", "Timed out waiting for a worker slot"),
            ),

            // 500 Internal Server Error - details are never exposed
            TicketingError::Database(_)
            | TicketingError::Serialization(_)
            | TicketingError::Publish(_)
            | TicketingError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal_error(),
            ),
        };

        AppError::new(status, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_out_of_stock_maps_to_409() {
        let app_error: AppError = TicketingError::OutOfStock.into();
        assert_eq!(app_error.status(), StatusCode::CONFLICT);
        assert_eq!(app_error.response().error_code, "OUT_OF_STOCK");
    }

    #[test]
    fn test_queue_full_maps_to_429() {
        let app_error: AppError = TicketingError::QueueFull.into();
        assert_eq!(app_error.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(app_error.response().error_code, "QUEUE_FULL");
    }

    #[test]
    fn test_payment_failed_maps_to_402() {
        let app_error: AppError = TicketingError::PaymentFailed(Uuid::nil()).into();
        assert_eq!(app_error.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(app_error.response().error_code, "PAYMENT_FAILED");
    }

    #[test]
    fn test_reservation_not_found_maps_to_404() {
        let app_error: AppError = TicketingError::ReservationNotFound(Uuid::nil()).into();
        assert_eq!(app_error.status(), StatusCode::NOT_FOUND);
        assert_eq!(app_error.response().error_code, "RESERVATION_NOT_FOUND");
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let app_error: AppError = TicketingError::InvalidInput("qty must be at least 1").into();
        assert_eq!(app_error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app_error.response().error_code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let app_error: AppError =
            TicketingError::Publish("broker 127.0.0.1:9092 unreachable".to_string()).into();
        assert_eq!(app_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app_error.response().message, "Internal error");
    }

    #[test]
    fn test_deadline_exceeded_maps_to_504() {
        let app_error: AppError = TicketingError::DeadlineExceeded.into();
        assert_eq!(app_error.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(app_error.response().error_code, "DEADLINE_EXCEEDED");
    }
}
