// In-memory BookingRepository

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::entities::Booking;
use crate::domain::repositories::BookingRepository;
use crate::domain::value_objects::{BookingId, ReservationId};
use crate::TicketingError;

#[derive(Debug, Default)]
struct BookingState {
    items: HashMap<BookingId, Booking>,
    by_reservation: HashMap<ReservationId, BookingId>,
}

/// In-memory booking store. The reservation-id index enforces the
/// at-most-one-booking constraint under one write lock.
#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    state: RwLock<BookingState>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn create_if_not_exists(&self, booking: &Booking) -> Result<bool, TicketingError> {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if state.by_reservation.contains_key(&booking.reservation_id()) {
            return Ok(false);
        }
        state
            .by_reservation
            .insert(booking.reservation_id(), booking.id());
        state.items.insert(booking.id(), booking.clone());
        Ok(true)
    }

    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Option<Booking>, TicketingError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .by_reservation
            .get(&reservation_id)
            .and_then(|id| state.items.get(id))
            .cloned())
    }
}
