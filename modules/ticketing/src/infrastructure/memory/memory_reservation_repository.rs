// In-memory ReservationRepository

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::entities::Reservation;
use crate::domain::repositories::ReservationRepository;
use crate::domain::value_objects::{ReservationId, ReservationStatus};
use crate::TicketingError;

/// In-memory reservation mirror, used in tests and in single-node setups
/// without a database.
#[derive(Debug, Default)]
pub struct MemoryReservationRepository {
    items: RwLock<HashMap<ReservationId, Reservation>>,
}

impl MemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn upsert(&self, reservation: &Reservation) -> Result<(), TicketingError> {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        items.insert(reservation.id(), reservation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, TicketingError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<(), TicketingError> {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // The mirror takes the status as given; unknown ids are ignored.
        if let Some(existing) = items.get(&id) {
            let updated = Reservation::reconstitute(
                existing.id(),
                existing.user_id().to_string(),
                existing.event_id(),
                existing.category().to_string(),
                existing.qty(),
                status,
                existing.expires_at(),
                existing.created_at(),
            );
            items.insert(id, updated);
        }
        Ok(())
    }
}
