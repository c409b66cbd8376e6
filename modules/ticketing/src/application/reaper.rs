// Expiry reaper - periodic reclamation of timed-out holds
//
// The reaper is the liveness guarantee for inventory: whatever happens to
// a coordinator mid-flight, a reserved hold is reclaimed within
// ttl + interval of its creation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::use_cases::ReleaseExpiredUseCase;
use crate::domain::repositories::ReservationRepository;
use crate::domain::services::{EventPublisher, StockEngine};

/// Periodic driver of `ReleaseExpiredUseCase`.
pub struct ExpiryReaper<S, R, P>
where
    S: StockEngine + ?Sized,
    R: ReservationRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    release_expired: Arc<ReleaseExpiredUseCase<S, R, P>>,
    interval: Duration,
    batch: usize,
}

impl<S, R, P> ExpiryReaper<S, R, P>
where
    S: StockEngine + ?Sized,
    R: ReservationRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    pub fn new(
        release_expired: Arc<ReleaseExpiredUseCase<S, R, P>>,
        interval: Duration,
        batch: usize,
    ) -> Self {
        Self {
            release_expired,
            interval,
            batch,
        }
    }

    /// Sweeps every `interval` until the token is cancelled. Cancellation
    /// is observed between ticks; a sweep in progress finishes first.
    pub async fn run(self, token: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_ms = self.interval.as_millis() as u64, batch = self.batch,
            "expiry reaper started");
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("expiry reaper stopped");
                    return;
                }
                _ = ticker.tick() => {
                    match self.release_expired.execute(Utc::now(), self.batch).await {
                        Ok(released) if !released.is_empty() => {
                            info!(count = released.len(), "reclaimed expired holds");
                        }
                        Ok(_) => {}
                        Err(error) => {
                            warn!(%error, "expiry sweep failed");
                        }
                    }
                }
            }
        }
    }
}
