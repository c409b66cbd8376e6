// Response DTOs for ticketing operations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Booking, ConcertEvent, Reservation, TicketCategory};

/// A concert event as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&ConcertEvent> for EventResponse {
    fn from(event: &ConcertEvent) -> Self {
        Self {
            id: event.id().into_uuid(),
            name: event.name().to_string(),
            date: event.date(),
            created_at: event.created_at(),
        }
    }
}

/// A ticket category as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub total_stock: u32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&TicketCategory> for CategoryResponse {
    fn from(category: &TicketCategory) -> Self {
        Self {
            id: category.id().into_uuid(),
            event_id: category.event_id().into_uuid(),
            name: category.name().to_string(),
            total_stock: category.total_stock(),
            price: category.price(),
            created_at: category.created_at(),
        }
    }
}

/// A reservation hold as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Uuid,
    pub category: String,
    pub qty: u32,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&Reservation> for ReservationResponse {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id().into_uuid(),
            user_id: reservation.user_id().to_string(),
            event_id: reservation.event_id().into_uuid(),
            category: reservation.category().to_string(),
            qty: reservation.qty(),
            status: reservation.status().to_string(),
            expires_at: reservation.expires_at(),
            created_at: reservation.created_at(),
        }
    }
}

/// A booking as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id().into_uuid(),
            reservation_id: booking.reservation_id().into_uuid(),
            payment_status: booking.payment_status().to_string(),
            created_at: booking.created_at(),
        }
    }
}

/// Remaining stock per category of one event.
/// Category names are lower-cased for the API surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub event_id: Uuid,
    pub categories: HashMap<String, u32>,
}
