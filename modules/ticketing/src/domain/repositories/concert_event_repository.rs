// ConcertEventRepository trait - persistence for concert events

use async_trait::async_trait;

use crate::domain::entities::ConcertEvent;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// Repository trait for ConcertEvent persistence operations.
#[async_trait]
pub trait ConcertEventRepository: Send + Sync {
    /// Saves a new event
    async fn create(&self, event: &ConcertEvent) -> Result<(), TicketingError>;

    /// Finds an event by its unique ID
    async fn find_by_id(&self, id: EventId) -> Result<Option<ConcertEvent>, TicketingError>;
}
