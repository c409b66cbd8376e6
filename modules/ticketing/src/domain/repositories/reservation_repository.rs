// ReservationRepository trait - durable mirror of reservation records

use async_trait::async_trait;

use crate::domain::entities::Reservation;
use crate::domain::value_objects::{ReservationId, ReservationStatus};
use crate::TicketingError;

/// Repository trait for the durable reservation mirror.
///
/// The stock engine holds the authoritative state during the hold window;
/// this store keeps an audit copy. Most callers treat it as best-effort,
/// so implementations must never be load-bearing for inventory
/// correctness.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts the reservation, or overwrites status and expiry on conflict
    async fn upsert(&self, reservation: &Reservation) -> Result<(), TicketingError>;

    /// Finds a reservation by its unique ID
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, TicketingError>;

    /// Updates the status of an existing reservation.
    /// Unknown ids are silently ignored.
    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<(), TicketingError>;
}
