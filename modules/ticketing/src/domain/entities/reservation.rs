// Reservation entity - a time-bounded hold on ticket stock

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EventId, ReservationId, ReservationStatus};
use crate::TicketingError;

/// A hold on `qty` tickets of one (event, category) cell, valid until
/// `expires_at`. Out of `Reserved` the only transitions are `confirm` and
/// `expire`; both end states are terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    user_id: String,
    event_id: EventId,
    category: String,
    qty: u32,
    status: ReservationStatus,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reserved hold expiring `ttl` from now.
    /// `category` must already be in its normalized (upper-case) form.
    pub fn create(
        user_id: String,
        event_id: EventId,
        category: String,
        qty: u32,
        ttl: Duration,
    ) -> Result<Self, TicketingError> {
        if qty < 1 {
            return Err(TicketingError::InvalidInput("qty must be at least 1"));
        }
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| TicketingError::InvalidInput("reservation ttl out of range"))?;
        let now = Utc::now();
        Ok(Self {
            id: ReservationId::new(),
            user_id,
            event_id,
            category,
            qty,
            status: ReservationStatus::Reserved,
            expires_at: now + ttl,
            created_at: now,
        })
    }

    /// Reconstitutes a Reservation from persistence
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReservationId,
        user_id: String,
        event_id: EventId,
        category: String,
        qty: u32,
        status: ReservationStatus,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            event_id,
            category,
            qty,
            status,
            expires_at,
            created_at,
        }
    }

    /// Transitions the hold to `Confirmed`
    pub fn confirm(&mut self) -> Result<(), TicketingError> {
        if self.status != ReservationStatus::Reserved {
            return Err(TicketingError::ReservationFinalized(self.id.into_uuid()));
        }
        self.status = ReservationStatus::Confirmed;
        Ok(())
    }

    /// Transitions the hold to `Expired`
    pub fn expire(&mut self) -> Result<(), TicketingError> {
        if self.status != ReservationStatus::Reserved {
            return Err(TicketingError::ReservationFinalized(self.id.into_uuid()));
        }
        self.status = ReservationStatus::Expired;
        Ok(())
    }

    /// Returns true if the hold is reserved but past its expiry time
    pub fn is_expired(&self) -> bool {
        self.status == ReservationStatus::Reserved && Utc::now() > self.expires_at
    }

    pub fn id(&self) -> ReservationId {
        self.id
    }
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
    pub fn event_id(&self) -> EventId {
        self.event_id
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn qty(&self) -> u32 {
        self.qty
    }
    pub fn status(&self) -> ReservationStatus {
        self.status
    }
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_reservation() -> Reservation {
        Reservation::create(
            "user-1".to_string(),
            EventId::new(),
            "VIP".to_string(),
            2,
            Duration::from_secs(300),
        )
        .unwrap()
    }

    #[test]
    fn test_create_starts_reserved() {
        let reservation = new_reservation();
        assert_eq!(reservation.status(), ReservationStatus::Reserved);
        assert!(reservation.expires_at() > reservation.created_at());
        assert!(!reservation.is_expired());
    }

    #[test]
    fn test_create_rejects_zero_qty() {
        let result = Reservation::create(
            "user-1".to_string(),
            EventId::new(),
            "VIP".to_string(),
            0,
            Duration::from_secs(300),
        );
        assert!(matches!(result, Err(TicketingError::InvalidInput(_))));
    }

    #[test]
    fn test_confirm_is_terminal() {
        let mut reservation = new_reservation();
        reservation.confirm().unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Confirmed);

        assert!(matches!(
            reservation.confirm(),
            Err(TicketingError::ReservationFinalized(_))
        ));
        assert!(matches!(
            reservation.expire(),
            Err(TicketingError::ReservationFinalized(_))
        ));
    }

    #[test]
    fn test_expire_is_terminal() {
        let mut reservation = new_reservation();
        reservation.expire().unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Expired);

        assert!(matches!(
            reservation.confirm(),
            Err(TicketingError::ReservationFinalized(_))
        ));
    }
}
