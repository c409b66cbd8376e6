// In-process StockEngine over a single mutex
//
// One lock guards stock cells, hold metadata, and the expiry index
// together, which makes every trait operation one atomic unit. The lock is
// only ever held for map and heap work, never across an await.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::services::{ReservationHold, StockEngine};
use crate::domain::value_objects::{EventId, ReservationId, ReservationStatus};
use crate::TicketingError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CellKey {
    event_id: EventId,
    category: String,
}

impl CellKey {
    fn new(event_id: EventId, category: &str) -> Self {
        Self {
            event_id,
            category: category.to_string(),
        }
    }
}

/// Min-ordering entry of the expiry index (wrapped in `Reverse` inside the
/// heap). Entries are never removed eagerly; a popped entry whose hold is
/// already finalized is simply discarded.
#[derive(Debug, Clone)]
struct ExpiryEntry {
    expires_at: DateTime<Utc>,
    reservation_id: ReservationId,
}

impl Ord for ExpiryEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expires_at.cmp(&other.expires_at).then_with(|| {
            self.reservation_id
                .into_uuid()
                .cmp(&other.reservation_id.into_uuid())
        })
    }
}

impl PartialOrd for ExpiryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ExpiryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExpiryEntry {}

#[derive(Debug, Default)]
struct EngineState {
    stocks: HashMap<CellKey, u32>,
    holds: HashMap<ReservationId, ReservationHold>,
    expiry: BinaryHeap<Reverse<ExpiryEntry>>,
}

/// In-memory stock engine, the single-process realization of the atomic
/// reserve/confirm/release contract. Finalized holds stay readable in the
/// metadata map; only the reaper path (`release_expired`) reclaims stock
/// from timed-out holds.
#[derive(Debug, Default)]
pub struct MemoryStockEngine {
    state: Mutex<EngineState>,
}

impl MemoryStockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StockEngine for MemoryStockEngine {
    async fn init_stock(
        &self,
        event_id: EventId,
        category: &str,
        total: u32,
    ) -> Result<(), TicketingError> {
        let mut state = self.state();
        state
            .stocks
            .entry(CellKey::new(event_id, category))
            .or_insert(total);
        Ok(())
    }

    async fn stock_levels(
        &self,
        event_id: EventId,
        categories: &[String],
    ) -> Result<HashMap<String, u32>, TicketingError> {
        let state = self.state();
        Ok(categories
            .iter()
            .map(|category| {
                let remaining = state
                    .stocks
                    .get(&CellKey::new(event_id, category))
                    .copied()
                    .unwrap_or(0);
                (category.clone(), remaining)
            })
            .collect())
    }

    async fn reserve(&self, hold: ReservationHold) -> Result<(), TicketingError> {
        let mut state = self.state();
        let key = CellKey::new(hold.event_id, &hold.category);
        let remaining = state.stocks.get(&key).copied().unwrap_or(0);
        if remaining < hold.qty {
            return Err(TicketingError::OutOfStock);
        }

        state.stocks.insert(key, remaining - hold.qty);
        state.expiry.push(Reverse(ExpiryEntry {
            expires_at: hold.expires_at,
            reservation_id: hold.reservation_id,
        }));
        let mut hold = hold;
        hold.status = ReservationStatus::Reserved;
        state.holds.insert(hold.reservation_id, hold);
        Ok(())
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<ReservationHold, TicketingError> {
        let state = self.state();
        let hold = state
            .holds
            .get(&id)
            .ok_or(TicketingError::ReservationNotFound(id.into_uuid()))?;
        // An expired hold reads as gone, but reclaiming it is the reaper's
        // job; this path must not touch stock.
        if !matches!(
            hold.status,
            ReservationStatus::Reserved | ReservationStatus::Confirmed
        ) || Utc::now() > hold.expires_at
        {
            return Err(TicketingError::ReservationNotFound(id.into_uuid()));
        }
        Ok(hold.clone())
    }

    async fn confirm_reservation(&self, id: ReservationId) -> Result<(), TicketingError> {
        let mut state = self.state();
        let hold = state
            .holds
            .get_mut(&id)
            .ok_or(TicketingError::ReservationNotFound(id.into_uuid()))?;
        if hold.status != ReservationStatus::Reserved {
            return Err(TicketingError::ReservationFinalized(id.into_uuid()));
        }
        hold.status = ReservationStatus::Confirmed;
        Ok(())
    }

    async fn release_reservation(
        &self,
        id: ReservationId,
    ) -> Result<ReservationHold, TicketingError> {
        let mut state = self.state();
        let hold = state
            .holds
            .get_mut(&id)
            .ok_or(TicketingError::ReservationNotFound(id.into_uuid()))?;
        if hold.status != ReservationStatus::Reserved {
            return Err(TicketingError::ReservationFinalized(id.into_uuid()));
        }
        hold.status = ReservationStatus::Expired;
        let released = hold.clone();

        let key = CellKey::new(released.event_id, &released.category);
        *state.stocks.entry(key).or_insert(0) += released.qty;
        Ok(released)
    }

    async fn release_expired(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<ReservationHold>, TicketingError> {
        let mut state = self.state();
        let mut released = Vec::new();

        while released.len() < limit {
            match state.expiry.peek() {
                Some(Reverse(entry)) if entry.expires_at <= now => {}
                _ => break,
            }
            let Some(Reverse(entry)) = state.expiry.pop() else {
                break;
            };

            let Some(hold) = state.holds.get_mut(&entry.reservation_id) else {
                continue;
            };
            // Confirmed and already-released holds leave stale index
            // entries behind; they are dropped here.
            if hold.status != ReservationStatus::Reserved {
                continue;
            }

            hold.status = ReservationStatus::Expired;
            let reclaimed = hold.clone();
            let key = CellKey::new(reclaimed.event_id, &reclaimed.category);
            *state.stocks.entry(key).or_insert(0) += reclaimed.qty;
            released.push(reclaimed);
        }

        Ok(released)
    }
}
