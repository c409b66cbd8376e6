// ReservationStatus enum - lifecycle of a reservation hold

use crate::TicketingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a reservation hold.
/// `Reserved` is the only live state; `Confirmed` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Hold is active and keeping stock off the market
    Reserved,
    /// Payment went through, stock is permanently claimed
    Confirmed,
    /// Hold timed out or payment failed, stock was restored
    Expired,
}

impl ReservationStatus {
    /// Returns true if the reservation is still holding stock
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Reserved)
    }

    /// Returns true if no further transitions are permitted
    pub fn is_finalized(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::Expired
        )
    }
}

impl FromStr for ReservationStatus {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reserved" => Ok(ReservationStatus::Reserved),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "expired" => Ok(ReservationStatus::Expired),
            _ => Err(TicketingError::InvalidReservationStatusValue),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Reserved => write!(f, "reserved"),
            ReservationStatus::Confirmed => write!(f, "confirmed"),
            ReservationStatus::Expired => write!(f, "expired"),
        }
    }
}
