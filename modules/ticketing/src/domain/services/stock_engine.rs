// StockEngine trait - the atomic authority over inventory and live holds

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Reservation;
use crate::domain::value_objects::{EventId, ReservationId, ReservationStatus};
use crate::TicketingError;

/// Reservation metadata as the stock engine stores it for the duration of
/// the hold window. A plain record; the `Reservation` entity remains the
/// domain-facing shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationHold {
    pub reservation_id: ReservationId,
    pub user_id: String,
    pub event_id: EventId,
    pub category: String,
    pub qty: u32,
    pub status: ReservationStatus,
    pub expires_at: DateTime<Utc>,
}

impl From<&Reservation> for ReservationHold {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.id(),
            user_id: reservation.user_id().to_string(),
            event_id: reservation.event_id(),
            category: reservation.category().to_string(),
            qty: reservation.qty(),
            status: reservation.status(),
            expires_at: reservation.expires_at(),
        }
    }
}

/// Single source of truth for stock cells, live reservation metadata, and
/// the expiry index.
///
/// Every operation is atomic with respect to every other operation touching
/// the same (event, category) cell: the check-then-decrement in `reserve`
/// is never observable as two steps by a concurrent caller. No other
/// component may mutate stock cells, holds, or the expiry index.
#[async_trait]
pub trait StockEngine: Send + Sync {
    /// Idempotently seeds the cell for (event, category) with `total`.
    /// Does nothing if the cell already exists.
    async fn init_stock(
        &self,
        event_id: EventId,
        category: &str,
        total: u32,
    ) -> Result<(), TicketingError>;

    /// Returns the current stock of each requested category
    async fn stock_levels(
        &self,
        event_id: EventId,
        categories: &[String],
    ) -> Result<HashMap<String, u32>, TicketingError>;

    /// Atomically decrements the cell by `hold.qty` and stores the hold as
    /// `reserved`, indexed by `hold.expires_at`. Fails with `OutOfStock`
    /// when the cell has fewer than `hold.qty` left; partial fills never
    /// happen.
    async fn reserve(&self, hold: ReservationHold) -> Result<(), TicketingError>;

    /// Returns the hold if its status is reserved or confirmed and it has
    /// not passed its expiry time. Reading never mutates state; an expired
    /// `reserved` hold is reported as `ReservationNotFound` and left for
    /// the reaper.
    async fn get_reservation(&self, id: ReservationId) -> Result<ReservationHold, TicketingError>;

    /// Transitions a reserved hold to confirmed and drops it from the
    /// expiry index. Stock is not restored. Fails `ReservationNotFound`
    /// for unknown ids and `ReservationFinalized` for already-final holds.
    async fn confirm_reservation(&self, id: ReservationId) -> Result<(), TicketingError>;

    /// Transitions a reserved hold to expired, restores its qty to the
    /// cell, and drops it from the expiry index. Returns the released hold.
    /// Failure taxonomy mirrors `confirm_reservation`.
    async fn release_reservation(
        &self,
        id: ReservationId,
    ) -> Result<ReservationHold, TicketingError>;

    /// Releases up to `limit` reserved holds with `expires_at <= now`:
    /// stock restored, status set to expired, index entry removed, all in
    /// one atomic unit per hold. Returns the released holds.
    async fn release_expired(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<ReservationHold>, TicketingError>;
}
