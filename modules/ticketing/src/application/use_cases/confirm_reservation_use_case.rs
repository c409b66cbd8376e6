// ConfirmReservationUseCase - settles a hold into a booking or a release

use std::sync::Arc;

use metrics::counter;
use tracing::{info, warn};

use crate::application::dtos::commands::ConfirmReservationCommand;
use crate::application::dtos::responses::BookingResponse;
use crate::domain::entities::Booking;
use crate::domain::repositories::{BookingRepository, ReservationRepository};
use crate::domain::services::{topics, EventPublisher, ExpiryNotice, StockEngine};
use crate::domain::value_objects::{ReservationId, ReservationStatus};
use crate::TicketingError;

/// Use case for confirming a reservation.
///
/// With a successful payment the hold becomes a booking; repeats of the
/// same confirmation are answered from the booking store so retries are
/// idempotent. With a failed payment the hold is released and stock
/// restored. The reservation mirror and the producer are best-effort on
/// the failure path; the stock engine plus the reaper carry the inventory
/// invariant on their own.
pub struct ConfirmReservationUseCase<S, R, B, P>
where
    S: StockEngine + ?Sized,
    R: ReservationRepository + ?Sized,
    B: BookingRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    stock: Arc<S>,
    reservations: Arc<R>,
    bookings: Arc<B>,
    publisher: Arc<P>,
}

impl<S, R, B, P> ConfirmReservationUseCase<S, R, B, P>
where
    S: StockEngine + ?Sized,
    R: ReservationRepository + ?Sized,
    B: BookingRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    /// Creates a new instance of ConfirmReservationUseCase
    pub fn new(
        stock: Arc<S>,
        reservations: Arc<R>,
        bookings: Arc<B>,
        publisher: Arc<P>,
    ) -> Self {
        Self {
            stock,
            reservations,
            bookings,
            publisher,
        }
    }

    /// Executes the use case to settle a hold
    ///
    /// # Errors
    /// * `TicketingError::ReservationNotFound` - Unknown or already-expired
    ///   hold with no booking to replay
    /// * `TicketingError::PaymentFailed` - `payment_ok` was false; the hold
    ///   has been released
    pub async fn execute(
        &self,
        command: ConfirmReservationCommand,
    ) -> Result<BookingResponse, TicketingError> {
        let id = ReservationId::from_uuid(command.reservation_id);

        // 1. The stock engine is the authority on hold liveness. A missing
        //    hold may still be a confirmed reservation whose metadata aged
        //    out, so replay from the booking store before giving up.
        let hold = match self.stock.get_reservation(id).await {
            Ok(hold) => hold,
            Err(TicketingError::ReservationNotFound(_)) => {
                if let Some(existing) = self.bookings.find_by_reservation_id(id).await? {
                    return Ok(BookingResponse::from(&existing));
                }
                return Err(TicketingError::ReservationNotFound(command.reservation_id));
            }
            Err(error) => return Err(error),
        };

        // 2. Failed payment: release the hold and report. Every step after
        //    the engine release is best-effort; the release itself may race
        //    the reaper, which is fine.
        if !command.payment_ok {
            match self.stock.release_reservation(id).await {
                Ok(_) | Err(TicketingError::ReservationFinalized(_)) => {}
                Err(error) => {
                    warn!(%error, reservation_id = %command.reservation_id,
                        "release after failed payment did not commit; reaper will reclaim");
                }
            }
            if let Err(error) = self
                .reservations
                .update_status(id, ReservationStatus::Expired)
                .await
            {
                warn!(%error, reservation_id = %command.reservation_id,
                    "failed to mirror expired status");
            }
            self.publish_expiry(&hold.event_id.into_uuid().to_string(), id)
                .await;
            counter!("ticketing_reservations_expired_total").increment(1);
            return Err(TicketingError::PaymentFailed(command.reservation_id));
        }

        // 3. Transition reserved -> confirmed. If someone beat us to a
        //    terminal state, a prior confirmation may have left a booking.
        match self.stock.confirm_reservation(id).await {
            Ok(()) => {}
            Err(TicketingError::ReservationFinalized(_)) => {
                if let Some(existing) = self.bookings.find_by_reservation_id(id).await? {
                    return Ok(BookingResponse::from(&existing));
                }
                return Err(TicketingError::ReservationFinalized(command.reservation_id));
            }
            Err(error) => return Err(error),
        }

        // 4. Best-effort mirror update
        if let Err(error) = self
            .reservations
            .update_status(id, ReservationStatus::Confirmed)
            .await
        {
            warn!(%error, reservation_id = %command.reservation_id,
                "failed to mirror confirmed status");
        }

        // 5. Create the booking; a lost race here means a concurrent retry
        //    already created it, so return that one.
        let booking = Booking::create(id);
        let created = self.bookings.create_if_not_exists(&booking).await?;
        let booking = if created {
            booking
        } else {
            self.bookings
                .find_by_reservation_id(id)
                .await?
                .ok_or(TicketingError::BookingNotFound(command.reservation_id))?
        };

        // 6. Publish the booking record
        self.publisher
            .publish(
                topics::TICKET_CONFIRMED,
                &hold.event_id.into_uuid().to_string(),
                &serde_json::to_vec(&booking)?,
            )
            .await?;

        counter!("ticketing_reservations_confirmed_total").increment(1);
        info!(
            reservation_id = %command.reservation_id,
            booking_id = %booking.id().into_uuid(),
            "reservation confirmed"
        );

        Ok(BookingResponse::from(&booking))
    }

    async fn publish_expiry(&self, event_key: &str, id: ReservationId) {
        let notice = ExpiryNotice::new(id);
        let payload = match serde_json::to_vec(&notice) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "failed to encode expiry notice");
                return;
            }
        };
        if let Err(error) = self
            .publisher
            .publish(topics::TICKET_EXPIRED, event_key, &payload)
            .await
        {
            warn!(%error, "failed to publish expiry notice");
        }
    }
}
