// TicketCategory entity - priced inventory partition of an event

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CategoryId, EventId};
use crate::TicketingError;

/// A ticket category for one event, e.g. VIP or REGULAR.
/// The name is normalized to trimmed upper-case on creation and the pair
/// (event_id, name) identifies the stock cell. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketCategory {
    id: CategoryId,
    event_id: EventId,
    name: String,
    total_stock: u32,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl TicketCategory {
    /// Creates a new category with a normalized name
    pub fn create(
        event_id: EventId,
        name: &str,
        total_stock: u32,
        price: Decimal,
    ) -> Result<Self, TicketingError> {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(TicketingError::InvalidInput(
                "category name must not be empty",
            ));
        }
        if total_stock < 1 {
            return Err(TicketingError::InvalidInput(
                "total_stock must be at least 1",
            ));
        }
        if price < Decimal::ZERO {
            return Err(TicketingError::InvalidInput("price must not be negative"));
        }
        Ok(Self {
            id: CategoryId::new(),
            event_id,
            name,
            total_stock,
            price,
            created_at: Utc::now(),
        })
    }

    /// Reconstitutes a TicketCategory from persistence
    pub fn reconstitute(
        id: CategoryId,
        event_id: EventId,
        name: String,
        total_stock: u32,
        price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            name,
            total_stock,
            price,
            created_at,
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }
    pub fn event_id(&self) -> EventId {
        self.event_id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn total_stock(&self) -> u32 {
        self.total_stock
    }
    pub fn price(&self) -> Decimal {
        self.price
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_normalizes_name() {
        let category =
            TicketCategory::create(EventId::new(), "  vip  ", 100, dec!(250.00)).unwrap();
        assert_eq!(category.name(), "VIP");
        assert_eq!(category.total_stock(), 100);
    }

    #[test]
    fn test_create_rejects_zero_stock() {
        let result = TicketCategory::create(EventId::new(), "VIP", 0, dec!(250.00));
        assert!(matches!(result, Err(TicketingError::InvalidInput(_))));
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let result = TicketCategory::create(EventId::new(), "VIP", 10, dec!(-1));
        assert!(matches!(result, Err(TicketingError::InvalidInput(_))));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let result = TicketCategory::create(EventId::new(), "   ", 10, dec!(10));
        assert!(matches!(result, Err(TicketingError::InvalidInput(_))));
    }
}
