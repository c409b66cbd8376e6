// BookingRepository trait - idempotent booking records

use async_trait::async_trait;

use crate::domain::entities::Booking;
use crate::domain::value_objects::ReservationId;
use crate::TicketingError;

/// Repository trait for Booking persistence operations.
/// The store enforces at most one booking per reservation id.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking unless one already exists for its reservation id.
    /// Returns false when a booking was already present; that is not an
    /// error, it tells the caller to return the pre-existing booking.
    async fn create_if_not_exists(&self, booking: &Booking) -> Result<bool, TicketingError>;

    /// Finds the booking created for a reservation, if any
    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Option<Booking>, TicketingError>;
}
