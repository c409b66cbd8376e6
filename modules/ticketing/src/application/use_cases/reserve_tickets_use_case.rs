// ReserveTicketsUseCase - admits, validates, and places a reservation hold

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::info;

use crate::application::admission::AdmissionGate;
use crate::application::dtos::commands::ReserveTicketsCommand;
use crate::application::dtos::responses::ReservationResponse;
use crate::domain::entities::Reservation;
use crate::domain::repositories::{ReservationRepository, TicketCategoryRepository};
use crate::domain::services::{topics, EventPublisher, ReservationHold, StockEngine};
use crate::domain::value_objects::EventId;
use crate::TicketingError;

/// Use case for reserving tickets.
///
/// The request first passes the admission gate, then the category is
/// resolved, the stock engine decrements the cell atomically, the hold is
/// optionally mirrored to the durable reservation store, and a
/// `ticket.reserved` record is published. The worker-pool slot is held for
/// the whole critical section.
pub struct ReserveTicketsUseCase<C, R, S, P>
where
    C: TicketCategoryRepository + ?Sized,
    R: ReservationRepository + ?Sized,
    S: StockEngine + ?Sized,
    P: EventPublisher + ?Sized,
{
    categories: Arc<C>,
    reservations: Arc<R>,
    stock: Arc<S>,
    publisher: Arc<P>,
    gate: Arc<AdmissionGate>,
    ttl: Duration,
    persist_sync: bool,
}

impl<C, R, S, P> ReserveTicketsUseCase<C, R, S, P>
where
    C: TicketCategoryRepository + ?Sized,
    R: ReservationRepository + ?Sized,
    S: StockEngine + ?Sized,
    P: EventPublisher + ?Sized,
{
    /// Creates a new instance of ReserveTicketsUseCase
    pub fn new(
        categories: Arc<C>,
        reservations: Arc<R>,
        stock: Arc<S>,
        publisher: Arc<P>,
        gate: Arc<AdmissionGate>,
        ttl: Duration,
        persist_sync: bool,
    ) -> Self {
        Self {
            categories,
            reservations,
            stock,
            publisher,
            gate,
            ttl,
            persist_sync,
        }
    }

    /// Executes the use case to place a hold on tickets
    ///
    /// # Errors
    /// * `TicketingError::InvalidInput` - Blank user id or category, or qty < 1
    /// * `TicketingError::QueueFull` - Shed by the admission gate
    /// * `TicketingError::DeadlineExceeded` - Timed out waiting for a worker slot
    /// * `TicketingError::CategoryNotFound` - Unknown (event, category) pair
    /// * `TicketingError::OutOfStock` - The cell has fewer than `qty` tickets left
    pub async fn execute(
        &self,
        command: ReserveTicketsCommand,
    ) -> Result<ReservationResponse, TicketingError> {
        // 1. Validate before touching any shared resource
        if command.user_id.trim().is_empty() {
            return Err(TicketingError::InvalidInput("user_id must not be empty"));
        }
        if command.category.trim().is_empty() {
            return Err(TicketingError::InvalidInput("category must not be empty"));
        }
        if command.qty < 1 {
            return Err(TicketingError::InvalidInput("qty must be at least 1"));
        }

        // 2. Pass the admission gate; the permit pins a worker slot until
        //    this function returns on any path.
        let _permit = self.gate.enter().await?;

        // 3. Resolve the category under its normalized name
        let event_id = EventId::from_uuid(command.event_id);
        let category = command.category.trim().to_uppercase();
        self.categories
            .find_by_event_and_name(event_id, &category)
            .await?
            .ok_or_else(|| TicketingError::CategoryNotFound {
                event_id: command.event_id,
                category: category.clone(),
            })?;

        // 4. Build the hold
        let reservation = Reservation::create(
            command.user_id.trim().to_string(),
            event_id,
            category,
            command.qty,
            self.ttl,
        )?;

        // 5. Atomic decrement; OutOfStock surfaces verbatim
        self.stock
            .reserve(ReservationHold::from(&reservation))
            .await?;

        // 6. Synchronous durability is optional. When it fails the hold
        //    stays in the stock engine and the reaper reclaims it.
        if self.persist_sync {
            self.reservations.upsert(&reservation).await?;
        }

        // 7. Publish the full reservation record
        self.publisher
            .publish(
                topics::TICKET_RESERVED,
                &command.event_id.to_string(),
                &serde_json::to_vec(&reservation)?,
            )
            .await?;

        counter!("ticketing_reservations_created_total").increment(1);
        info!(
            reservation_id = %reservation.id().into_uuid(),
            event_id = %command.event_id,
            category = %reservation.category(),
            qty = reservation.qty(),
            "reservation placed"
        );

        Ok(ReservationResponse::from(&reservation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::domain::entities::TicketCategory;
    use crate::infrastructure::memory::{
        MemoryReservationRepository, MemoryStockEngine, MemoryTicketCategoryRepository,
        RecordingEventPublisher,
    };

    struct Fixture {
        categories: Arc<MemoryTicketCategoryRepository>,
        reservations: Arc<MemoryReservationRepository>,
        stock: Arc<MemoryStockEngine>,
        publisher: Arc<RecordingEventPublisher>,
        event_id: Uuid,
    }

    impl Fixture {
        async fn with_stock(total: u32) -> Self {
            let categories = Arc::new(MemoryTicketCategoryRepository::new());
            let stock = Arc::new(MemoryStockEngine::new());
            let event_id = EventId::new();

            let category =
                TicketCategory::create(event_id, "VIP", total, dec!(150.00)).unwrap();
            categories.create(&category).await.unwrap();
            stock.init_stock(event_id, "VIP", total).await.unwrap();

            Self {
                categories,
                reservations: Arc::new(MemoryReservationRepository::new()),
                stock,
                publisher: Arc::new(RecordingEventPublisher::new()),
                event_id: event_id.into_uuid(),
            }
        }

        fn use_case(
            &self,
        ) -> ReserveTicketsUseCase<
            MemoryTicketCategoryRepository,
            MemoryReservationRepository,
            MemoryStockEngine,
            RecordingEventPublisher,
        > {
            ReserveTicketsUseCase::new(
                Arc::clone(&self.categories),
                Arc::clone(&self.reservations),
                Arc::clone(&self.stock),
                Arc::clone(&self.publisher),
                Arc::new(AdmissionGate::new(100, 10)),
                Duration::from_secs(300),
                true,
            )
        }
    }

    fn command(fixture: &Fixture, category: &str, qty: u32) -> ReserveTicketsCommand {
        ReserveTicketsCommand {
            user_id: "user-1".to_string(),
            event_id: fixture.event_id,
            category: category.to_string(),
            qty,
        }
    }

    #[tokio::test]
    async fn test_reserve_success_decrements_and_publishes() {
        let fixture = Fixture::with_stock(3).await;
        let use_case = fixture.use_case();

        let response = use_case.execute(command(&fixture, "vip", 2)).await.unwrap();
        assert_eq!(response.status, "reserved");
        assert_eq!(response.category, "VIP");

        let levels = fixture
            .stock
            .stock_levels(EventId::from_uuid(fixture.event_id), &["VIP".to_string()])
            .await
            .unwrap();
        assert_eq!(levels["VIP"], 1);

        // Mirrored synchronously and published once
        let mirrored = fixture
            .reservations
            .find_by_id(crate::ReservationId::from_uuid(response.id))
            .await
            .unwrap();
        assert!(mirrored.is_some());
        assert_eq!(fixture.publisher.published(topics::TICKET_RESERVED).len(), 1);
    }

    #[tokio::test]
    async fn test_reserve_out_of_stock_leaves_cell_untouched() {
        let fixture = Fixture::with_stock(1).await;
        let use_case = fixture.use_case();

        let result = use_case.execute(command(&fixture, "VIP", 2)).await;
        assert!(matches!(result, Err(TicketingError::OutOfStock)));

        let levels = fixture
            .stock
            .stock_levels(EventId::from_uuid(fixture.event_id), &["VIP".to_string()])
            .await
            .unwrap();
        assert_eq!(levels["VIP"], 1);
        assert!(fixture.publisher.published(topics::TICKET_RESERVED).is_empty());
    }

    #[tokio::test]
    async fn test_reserve_unknown_category() {
        let fixture = Fixture::with_stock(3).await;
        let use_case = fixture.use_case();

        let result = use_case.execute(command(&fixture, "BALCONY", 1)).await;
        assert!(matches!(result, Err(TicketingError::CategoryNotFound { .. })));
    }

    #[tokio::test]
    async fn test_reserve_rejects_blank_user() {
        let fixture = Fixture::with_stock(3).await;
        let use_case = fixture.use_case();

        let mut cmd = command(&fixture, "VIP", 1);
        cmd.user_id = "   ".to_string();
        let result = use_case.execute(cmd).await;
        assert!(matches!(result, Err(TicketingError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reserve_rejects_zero_qty() {
        let fixture = Fixture::with_stock(3).await;
        let use_case = fixture.use_case();

        let result = use_case.execute(command(&fixture, "VIP", 0)).await;
        assert!(matches!(result, Err(TicketingError::InvalidInput(_))));
    }
}
