// In-memory TicketCategoryRepository

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::entities::TicketCategory;
use crate::domain::repositories::TicketCategoryRepository;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

#[derive(Debug, Default)]
struct CategoryState {
    by_event: HashMap<EventId, Vec<TicketCategory>>,
    by_key: HashMap<(EventId, String), TicketCategory>,
}

/// In-memory category store, unique per (event, normalized name).
#[derive(Debug, Default)]
pub struct MemoryTicketCategoryRepository {
    state: RwLock<CategoryState>,
}

impl MemoryTicketCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketCategoryRepository for MemoryTicketCategoryRepository {
    async fn create(&self, category: &TicketCategory) -> Result<(), TicketingError> {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (category.event_id(), category.name().to_string());
        if state.by_key.contains_key(&key) {
            return Err(TicketingError::CategoryAlreadyExists(
                category.name().to_string(),
            ));
        }
        state.by_key.insert(key, category.clone());
        state
            .by_event
            .entry(category.event_id())
            .or_default()
            .push(category.clone());
        Ok(())
    }

    async fn find_by_event_id(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TicketCategory>, TicketingError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.by_event.get(&event_id).cloned().unwrap_or_default())
    }

    async fn find_by_event_and_name(
        &self,
        event_id: EventId,
        name: &str,
    ) -> Result<Option<TicketCategory>, TicketingError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.by_key.get(&(event_id, name.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = MemoryTicketCategoryRepository::new();
        let event_id = EventId::new();
        let category = TicketCategory::create(event_id, "VIP", 10, dec!(99)).unwrap();
        repo.create(&category).await.unwrap();

        let found = repo
            .find_by_event_and_name(event_id, "VIP")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), category.id());
        assert_eq!(repo.find_by_event_id(event_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_rejected() {
        let repo = MemoryTicketCategoryRepository::new();
        let event_id = EventId::new();
        let first = TicketCategory::create(event_id, "VIP", 10, dec!(99)).unwrap();
        let second = TicketCategory::create(event_id, "vip", 20, dec!(50)).unwrap();

        repo.create(&first).await.unwrap();
        let result = repo.create(&second).await;
        assert!(matches!(
            result,
            Err(TicketingError::CategoryAlreadyExists(_))
        ));
    }
}
