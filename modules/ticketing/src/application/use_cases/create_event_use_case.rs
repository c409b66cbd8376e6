// CreateEventUseCase - registers a concert event

use std::sync::Arc;

use crate::application::dtos::commands::CreateEventCommand;
use crate::application::dtos::responses::EventResponse;
use crate::domain::entities::ConcertEvent;
use crate::domain::repositories::ConcertEventRepository;
use crate::TicketingError;

/// Use case for creating a concert event.
pub struct CreateEventUseCase<E>
where
    E: ConcertEventRepository + ?Sized,
{
    events: Arc<E>,
}

impl<E> CreateEventUseCase<E>
where
    E: ConcertEventRepository + ?Sized,
{
    /// Creates a new instance of CreateEventUseCase
    pub fn new(events: Arc<E>) -> Self {
        Self { events }
    }

    /// Executes the use case to create an event
    ///
    /// # Errors
    /// * `TicketingError::InvalidInput` - Blank event name
    pub async fn execute(
        &self,
        command: CreateEventCommand,
    ) -> Result<EventResponse, TicketingError> {
        let event = ConcertEvent::create(&command.name, command.date)?;
        self.events.create(&event).await?;
        Ok(EventResponse::from(&event))
    }
}
