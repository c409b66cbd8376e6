// ConcertEvent entity - immutable anchor for ticket inventory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// A concert event. Categories and stock cells hang off its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcertEvent {
    id: EventId,
    name: String,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl ConcertEvent {
    /// Creates a new event with a trimmed, non-empty name
    pub fn create(name: &str, date: DateTime<Utc>) -> Result<Self, TicketingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TicketingError::InvalidInput("event name must not be empty"));
        }
        Ok(Self {
            id: EventId::new(),
            name: name.to_string(),
            date,
            created_at: Utc::now(),
        })
    }

    /// Reconstitutes a ConcertEvent from persistence
    pub fn reconstitute(
        id: EventId,
        name: String,
        date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            date,
            created_at,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
