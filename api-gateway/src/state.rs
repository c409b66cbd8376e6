// Application state shared across HTTP handlers
//
// Holds the ports of the ticketing core behind trait objects so the
// bootstrap can pick in-memory or external backends at startup, plus the
// process-global admission gate and the gateway's own services.

use std::sync::Arc;
use std::time::Duration;

use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, RateLimiter};
use metrics_exporter_prometheus::PrometheusHandle;

use ticketing::{
    AdmissionGate, BookingRepository, ConcertEventRepository, EventPublisher,
    ReservationRepository, StockEngine, TicketCategoryRepository,
};

use crate::auth::TokenVerifier;

/// Keyed limiter, one token bucket per user id.
pub type UserRateLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Application state shared across all HTTP handlers.
///
/// Handlers construct the use cases they need from these ports per
/// request; everything here is cheap to clone (Arc or Copy).
#[derive(Clone)]
pub struct AppState {
    events: Arc<dyn ConcertEventRepository>,
    categories: Arc<dyn TicketCategoryRepository>,
    reservations: Arc<dyn ReservationRepository>,
    bookings: Arc<dyn BookingRepository>,
    stock: Arc<dyn StockEngine>,
    publisher: Arc<dyn EventPublisher>,
    gate: Arc<AdmissionGate>,
    reservation_ttl: Duration,
    persist_sync: bool,
    token_verifier: Arc<TokenVerifier>,
    rate_limiter: Arc<UserRateLimiter>,
    metrics_handle: PrometheusHandle,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        events: Arc<dyn ConcertEventRepository>,
        categories: Arc<dyn TicketCategoryRepository>,
        reservations: Arc<dyn ReservationRepository>,
        bookings: Arc<dyn BookingRepository>,
        stock: Arc<dyn StockEngine>,
        publisher: Arc<dyn EventPublisher>,
        gate: Arc<AdmissionGate>,
        reservation_ttl: Duration,
        persist_sync: bool,
        token_verifier: Arc<TokenVerifier>,
        rate_limiter: Arc<UserRateLimiter>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            events,
            categories,
            reservations,
            bookings,
            stock,
            publisher,
            gate,
            reservation_ttl,
            persist_sync,
            token_verifier,
            rate_limiter,
            metrics_handle,
        }
    }

    pub fn events(&self) -> Arc<dyn ConcertEventRepository> {
        Arc::clone(&self.events)
    }

    pub fn categories(&self) -> Arc<dyn TicketCategoryRepository> {
        Arc::clone(&self.categories)
    }

    pub fn reservations(&self) -> Arc<dyn ReservationRepository> {
        Arc::clone(&self.reservations)
    }

    pub fn bookings(&self) -> Arc<dyn BookingRepository> {
        Arc::clone(&self.bookings)
    }

    pub fn stock(&self) -> Arc<dyn StockEngine> {
        Arc::clone(&self.stock)
    }

    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        Arc::clone(&self.publisher)
    }

    pub fn gate(&self) -> Arc<AdmissionGate> {
        Arc::clone(&self.gate)
    }

    pub fn reservation_ttl(&self) -> Duration {
        self.reservation_ttl
    }

    pub fn persist_sync(&self) -> bool {
        self.persist_sync
    }

    pub fn token_verifier(&self) -> &TokenVerifier {
        &self.token_verifier
    }

    pub fn rate_limiter(&self) -> &UserRateLimiter {
        &self.rate_limiter
    }

    pub fn metrics_handle(&self) -> &PrometheusHandle {
        &self.metrics_handle
    }
}
