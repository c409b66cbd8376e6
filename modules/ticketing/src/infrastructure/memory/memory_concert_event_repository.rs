// In-memory ConcertEventRepository

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::entities::ConcertEvent;
use crate::domain::repositories::ConcertEventRepository;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// In-memory event store.
#[derive(Debug, Default)]
pub struct MemoryConcertEventRepository {
    items: RwLock<HashMap<EventId, ConcertEvent>>,
}

impl MemoryConcertEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConcertEventRepository for MemoryConcertEventRepository {
    async fn create(&self, event: &ConcertEvent) -> Result<(), TicketingError> {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        items.insert(event.id(), event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<ConcertEvent>, TicketingError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(&id).cloned())
    }
}
