// Booking entity - the durable outcome of a confirmed reservation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BookingId, ReservationId};

/// Payment status recorded on the only creation path.
pub const PAYMENT_STATUS_PAID: &str = "paid";

/// The booking created when a reservation is confirmed with a successful
/// payment. At most one booking exists per reservation id; the booking
/// store enforces the uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    reservation_id: ReservationId,
    payment_status: String,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a paid booking for a confirmed reservation
    pub fn create(reservation_id: ReservationId) -> Self {
        Self {
            id: BookingId::new(),
            reservation_id,
            payment_status: PAYMENT_STATUS_PAID.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Reconstitutes a Booking from persistence
    pub fn reconstitute(
        id: BookingId,
        reservation_id: ReservationId,
        payment_status: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            payment_status,
            created_at,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }
    pub fn reservation_id(&self) -> ReservationId {
        self.reservation_id
    }
    pub fn payment_status(&self) -> &str {
        &self.payment_status
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
