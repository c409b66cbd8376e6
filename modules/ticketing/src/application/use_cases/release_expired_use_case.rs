// ReleaseExpiredUseCase - one reclamation sweep over timed-out holds

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::warn;

use crate::domain::repositories::ReservationRepository;
use crate::domain::services::{topics, EventPublisher, ExpiryNotice, ReservationHold, StockEngine};
use crate::domain::value_objects::ReservationStatus;
use crate::TicketingError;

/// Use case for reclaiming expired holds in one batch.
///
/// The stock engine commits the release (restore stock, mark expired,
/// drop from the expiry index) before this use case sees the hold, so the
/// mirror update and the `ticket.expired` publication are strictly
/// best-effort: a failure is logged and skipped, never unwound.
pub struct ReleaseExpiredUseCase<S, R, P>
where
    S: StockEngine + ?Sized,
    R: ReservationRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    stock: Arc<S>,
    reservations: Arc<R>,
    publisher: Arc<P>,
}

impl<S, R, P> ReleaseExpiredUseCase<S, R, P>
where
    S: StockEngine + ?Sized,
    R: ReservationRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    /// Creates a new instance of ReleaseExpiredUseCase
    pub fn new(stock: Arc<S>, reservations: Arc<R>, publisher: Arc<P>) -> Self {
        Self {
            stock,
            reservations,
            publisher,
        }
    }

    /// Releases up to `batch` holds expired at `now` and returns them
    pub async fn execute(
        &self,
        now: DateTime<Utc>,
        batch: usize,
    ) -> Result<Vec<ReservationHold>, TicketingError> {
        let released = self.stock.release_expired(now, batch).await?;

        for hold in &released {
            if let Err(error) = self
                .reservations
                .update_status(hold.reservation_id, ReservationStatus::Expired)
                .await
            {
                warn!(%error, reservation_id = %hold.reservation_id.into_uuid(),
                    "failed to mirror expired status");
            }

            let notice = ExpiryNotice::new(hold.reservation_id);
            match serde_json::to_vec(&notice) {
                Ok(payload) => {
                    if let Err(error) = self
                        .publisher
                        .publish(
                            topics::TICKET_EXPIRED,
                            &hold.event_id.into_uuid().to_string(),
                            &payload,
                        )
                        .await
                    {
                        warn!(%error, reservation_id = %hold.reservation_id.into_uuid(),
                            "failed to publish expiry notice");
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to encode expiry notice");
                }
            }
        }

        counter!("ticketing_reservations_expired_total").increment(released.len() as u64);
        Ok(released)
    }
}
