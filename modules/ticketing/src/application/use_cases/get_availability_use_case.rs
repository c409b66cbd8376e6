// GetAvailabilityUseCase - live remaining stock per category of an event

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::application::dtos::responses::AvailabilityResponse;
use crate::domain::repositories::{ConcertEventRepository, TicketCategoryRepository};
use crate::domain::services::StockEngine;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// Use case for listing the live availability of an event.
///
/// Reads the remaining stock of every category straight from the stock
/// engine, so active holds are already subtracted.
pub struct GetAvailabilityUseCase<E, C, S>
where
    E: ConcertEventRepository + ?Sized,
    C: TicketCategoryRepository + ?Sized,
    S: StockEngine + ?Sized,
{
    events: Arc<E>,
    categories: Arc<C>,
    stock: Arc<S>,
}

impl<E, C, S> GetAvailabilityUseCase<E, C, S>
where
    E: ConcertEventRepository + ?Sized,
    C: TicketCategoryRepository + ?Sized,
    S: StockEngine + ?Sized,
{
    /// Creates a new instance of GetAvailabilityUseCase
    pub fn new(events: Arc<E>, categories: Arc<C>, stock: Arc<S>) -> Self {
        Self {
            events,
            categories,
            stock,
        }
    }

    /// Executes the use case to read availability
    ///
    /// # Errors
    /// * `TicketingError::EventNotFound` - Unknown event
    pub async fn execute(&self, event_id: Uuid) -> Result<AvailabilityResponse, TicketingError> {
        let id = EventId::from_uuid(event_id);
        self.events
            .find_by_id(id)
            .await?
            .ok_or(TicketingError::EventNotFound(event_id))?;

        let categories = self.categories.find_by_event_id(id).await?;
        let names: Vec<String> = categories
            .iter()
            .map(|category| category.name().to_string())
            .collect();
        let levels = self.stock.stock_levels(id, &names).await?;

        let categories: HashMap<String, u32> = names
            .iter()
            .map(|name| {
                (
                    name.to_lowercase(),
                    levels.get(name).copied().unwrap_or(0),
                )
            })
            .collect();

        Ok(AvailabilityResponse {
            event_id,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    use crate::domain::entities::{ConcertEvent, Reservation, TicketCategory};
    use crate::infrastructure::memory::{
        MemoryConcertEventRepository, MemoryStockEngine, MemoryTicketCategoryRepository,
    };

    #[tokio::test]
    async fn test_availability_reflects_live_holds() {
        let events = Arc::new(MemoryConcertEventRepository::new());
        let categories = Arc::new(MemoryTicketCategoryRepository::new());
        let stock = Arc::new(MemoryStockEngine::new());

        let event = ConcertEvent::create("Open Air", Utc::now()).unwrap();
        let event_id = event.id();
        events.create(&event).await.unwrap();
        for (name, total) in [("VIP", 10u32), ("REGULAR", 50u32)] {
            let category = TicketCategory::create(event_id, name, total, dec!(50)).unwrap();
            categories.create(&category).await.unwrap();
            stock.init_stock(event_id, name, total).await.unwrap();
        }

        let reservation = Reservation::create(
            "user-1".to_string(),
            event_id,
            "VIP".to_string(),
            4,
            Duration::from_secs(300),
        )
        .unwrap();
        stock.reserve((&reservation).into()).await.unwrap();

        let use_case = GetAvailabilityUseCase::new(events, categories, stock);
        let response = use_case.execute(event_id.into_uuid()).await.unwrap();

        assert_eq!(response.categories["vip"], 6);
        assert_eq!(response.categories["regular"], 50);
    }

    #[tokio::test]
    async fn test_availability_unknown_event() {
        let use_case = GetAvailabilityUseCase::new(
            Arc::new(MemoryConcertEventRepository::new()),
            Arc::new(MemoryTicketCategoryRepository::new()),
            Arc::new(MemoryStockEngine::new()),
        );
        let result = use_case.execute(uuid::Uuid::nil()).await;
        assert!(matches!(result, Err(TicketingError::EventNotFound(_))));
    }
}
