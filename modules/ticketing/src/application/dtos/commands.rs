// Command DTOs for ticketing operations
//
// These DTOs carry the input of the public operations. They use primitive
// types (String, Uuid, u32) rather than domain value objects to keep the
// application boundary clean and let the use cases do the validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Command to create a concert event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventCommand {
    /// Event name (trimmed, must be non-empty)
    pub name: String,
    /// When the event takes place
    pub date: DateTime<Utc>,
}

/// Command to create a ticket category and seed its stock cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryCommand {
    /// Owning event
    pub event_id: Uuid,
    /// Category name; normalized to upper-case on write
    pub name: String,
    /// Initial and maximum stock of the cell (>= 1)
    pub total_stock: u32,
    /// Ticket price (>= 0)
    pub price: Decimal,
}

/// Command to reserve tickets: a claim on `qty` units of one
/// (event, category) cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveTicketsCommand {
    /// Buyer placing the hold
    pub user_id: String,
    /// Target event
    pub event_id: Uuid,
    /// Category name, any casing
    pub category: String,
    /// Number of tickets (>= 1); never partially filled
    pub qty: u32,
}

/// Command to settle a hold: confirm it into a booking or release it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmReservationCommand {
    /// The hold being settled
    pub reservation_id: Uuid,
    /// Payment outcome reported by the caller
    pub payment_ok: bool,
}
