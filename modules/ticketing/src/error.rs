// Ticketing module errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TicketingError {
    // Validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Invalid reservation status")]
    InvalidReservationStatusValue,

    // Domain lookups
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Category '{category}' not found for event {event_id}")]
    CategoryNotFound { event_id: Uuid, category: String },

    #[error("Category '{0}' already exists for this event")]
    CategoryAlreadyExists(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),

    #[error("No booking found for reservation: {0}")]
    BookingNotFound(Uuid),

    // Stock engine outcomes
    #[error("Out of stock")]
    OutOfStock,

    #[error("Reservation already finalized: {0}")]
    ReservationFinalized(Uuid),

    // Admission gate outcomes
    #[error("Queue is full")]
    QueueFull,

    #[error("Deadline exceeded while waiting for a worker slot")]
    DeadlineExceeded,

    // Confirm outcome
    #[error("Payment failed for reservation {0}")]
    PaymentFailed(Uuid),

    // Transport and store errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event producer error: {0}")]
    Publish(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
