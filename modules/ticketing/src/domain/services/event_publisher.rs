// EventPublisher trait - at-least-once stream of reservation transitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ReservationId;
use crate::TicketingError;

/// Topics carrying reservation state transitions, keyed by event id.
pub mod topics {
    pub const TICKET_RESERVED: &str = "ticket.reserved";
    pub const TICKET_CONFIRMED: &str = "ticket.confirmed";
    pub const TICKET_EXPIRED: &str = "ticket.expired";

    pub const ALL: &[&str] = &[TICKET_RESERVED, TICKET_CONFIRMED, TICKET_EXPIRED];
}

/// Payload published on `ticket.expired`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryNotice {
    pub reservation_id: Uuid,
    pub status: String,
}

impl ExpiryNotice {
    pub fn new(reservation_id: ReservationId) -> Self {
        Self {
            reservation_id: reservation_id.into_uuid(),
            status: "expired".to_string(),
        }
    }
}

/// Producer port for the downstream event stream.
///
/// Delivery is at-least-once; consumers deduplicate on reservation id.
/// Publication order is not guaranteed to match stock-engine commit order.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one record to `topic` under `key`
    async fn publish(&self, topic: &str, key: &str, payload: &[u8])
        -> Result<(), TicketingError>;
}
