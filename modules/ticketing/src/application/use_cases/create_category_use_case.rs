// CreateCategoryUseCase - registers a ticket category and seeds its stock cell

use std::sync::Arc;

use crate::application::dtos::commands::CreateCategoryCommand;
use crate::application::dtos::responses::CategoryResponse;
use crate::domain::entities::TicketCategory;
use crate::domain::repositories::{ConcertEventRepository, TicketCategoryRepository};
use crate::domain::services::StockEngine;
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// Use case for creating a ticket category.
///
/// After the category record is written, the stock engine's cell for
/// (event, name) is idempotently seeded with `total_stock`.
pub struct CreateCategoryUseCase<E, C, S>
where
    E: ConcertEventRepository + ?Sized,
    C: TicketCategoryRepository + ?Sized,
    S: StockEngine + ?Sized,
{
    events: Arc<E>,
    categories: Arc<C>,
    stock: Arc<S>,
}

impl<E, C, S> CreateCategoryUseCase<E, C, S>
where
    E: ConcertEventRepository + ?Sized,
    C: TicketCategoryRepository + ?Sized,
    S: StockEngine + ?Sized,
{
    /// Creates a new instance of CreateCategoryUseCase
    pub fn new(events: Arc<E>, categories: Arc<C>, stock: Arc<S>) -> Self {
        Self {
            events,
            categories,
            stock,
        }
    }

    /// Executes the use case to create a category
    ///
    /// # Errors
    /// * `TicketingError::InvalidInput` - Blank name, zero stock, or negative price
    /// * `TicketingError::EventNotFound` - Unknown event
    /// * `TicketingError::CategoryAlreadyExists` - Duplicate (event, name) pair
    pub async fn execute(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<CategoryResponse, TicketingError> {
        let event_id = EventId::from_uuid(command.event_id);
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(TicketingError::EventNotFound(command.event_id))?;

        let category = TicketCategory::create(
            event_id,
            &command.name,
            command.total_stock,
            command.price,
        )?;
        self.categories.create(&category).await?;

        self.stock
            .init_stock(event_id, category.name(), category.total_stock())
            .await?;

        Ok(CategoryResponse::from(&category))
    }
}
