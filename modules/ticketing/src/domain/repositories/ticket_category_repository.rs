// TicketCategoryRepository trait - persistence for ticket categories

use async_trait::async_trait;

use crate::domain::entities::TicketCategory;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// Repository trait for TicketCategory persistence operations.
/// Categories are unique per (event_id, name); `create` fails with
/// `CategoryAlreadyExists` on a duplicate pair.
#[async_trait]
pub trait TicketCategoryRepository: Send + Sync {
    /// Saves a new category
    async fn create(&self, category: &TicketCategory) -> Result<(), TicketingError>;

    /// Finds all categories of an event
    async fn find_by_event_id(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TicketCategory>, TicketingError>;

    /// Finds a category by event and normalized name
    async fn find_by_event_and_name(
        &self,
        event_id: EventId,
        name: &str,
    ) -> Result<Option<TicketCategory>, TicketingError>;
}
