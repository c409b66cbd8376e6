// End-to-end reservation lifecycle over the in-memory backends

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use ticketing::{
    topics, AdmissionGate, BookingRepository, ConfirmReservationCommand,
    ConfirmReservationUseCase, CreateCategoryCommand, CreateCategoryUseCase, CreateEventCommand,
    CreateEventUseCase, ExpiryReaper, GetAvailabilityUseCase, MemoryBookingRepository,
    MemoryConcertEventRepository, MemoryReservationRepository, MemoryStockEngine,
    MemoryTicketCategoryRepository, RecordingEventPublisher, ReleaseExpiredUseCase,
    ReservationRepository, ReserveTicketsCommand, ReserveTicketsUseCase, TicketCategoryRepository,
    TicketingError,
};
use tokio_util::sync::CancellationToken;

type Reserve = ReserveTicketsUseCase<
    MemoryTicketCategoryRepository,
    MemoryReservationRepository,
    MemoryStockEngine,
    RecordingEventPublisher,
>;
type Confirm = ConfirmReservationUseCase<
    MemoryStockEngine,
    MemoryReservationRepository,
    MemoryBookingRepository,
    RecordingEventPublisher,
>;
type Release = ReleaseExpiredUseCase<
    MemoryStockEngine,
    MemoryReservationRepository,
    RecordingEventPublisher,
>;

struct TestApp {
    events: Arc<MemoryConcertEventRepository>,
    categories: Arc<MemoryTicketCategoryRepository>,
    reservations: Arc<MemoryReservationRepository>,
    bookings: Arc<MemoryBookingRepository>,
    stock: Arc<MemoryStockEngine>,
    publisher: Arc<RecordingEventPublisher>,
    reserve: Arc<Reserve>,
    confirm: Arc<Confirm>,
    release: Arc<Release>,
    event_id: Uuid,
}

impl TestApp {
    /// Full stack over memory backends with one event and the given
    /// categories, a generous admission gate, and the given hold TTL.
    async fn new(category_setup: &[(&str, u32)], ttl: Duration) -> Self {
        let events = Arc::new(MemoryConcertEventRepository::new());
        let categories = Arc::new(MemoryTicketCategoryRepository::new());
        let reservations = Arc::new(MemoryReservationRepository::new());
        let bookings = Arc::new(MemoryBookingRepository::new());
        let stock = Arc::new(MemoryStockEngine::new());
        let publisher = Arc::new(RecordingEventPublisher::new());

        let create_event = CreateEventUseCase::new(Arc::clone(&events));
        let event = create_event
            .execute(CreateEventCommand {
                name: "Main Stage".to_string(),
                date: Utc::now(),
            })
            .await
            .unwrap();

        let create_category = CreateCategoryUseCase::new(
            Arc::clone(&events),
            Arc::clone(&categories),
            Arc::clone(&stock),
        );
        for (name, total) in category_setup {
            create_category
                .execute(CreateCategoryCommand {
                    event_id: event.id,
                    name: name.to_string(),
                    total_stock: *total,
                    price: dec!(100.00),
                })
                .await
                .unwrap();
        }

        let reserve = Arc::new(ReserveTicketsUseCase::new(
            Arc::clone(&categories),
            Arc::clone(&reservations),
            Arc::clone(&stock),
            Arc::clone(&publisher),
            Arc::new(AdmissionGate::new(1000, 50)),
            ttl,
            true,
        ));
        let confirm = Arc::new(ConfirmReservationUseCase::new(
            Arc::clone(&stock),
            Arc::clone(&reservations),
            Arc::clone(&bookings),
            Arc::clone(&publisher),
        ));
        let release = Arc::new(ReleaseExpiredUseCase::new(
            Arc::clone(&stock),
            Arc::clone(&reservations),
            Arc::clone(&publisher),
        ));

        Self {
            events,
            categories,
            reservations,
            bookings,
            stock,
            publisher,
            reserve,
            confirm,
            release,
            event_id: event.id,
        }
    }

    fn reserve_command(&self, user: &str, category: &str, qty: u32) -> ReserveTicketsCommand {
        ReserveTicketsCommand {
            user_id: user.to_string(),
            event_id: self.event_id,
            category: category.to_string(),
            qty,
        }
    }

    async fn remaining(&self, category: &str) -> u32 {
        let availability = GetAvailabilityUseCase::new(
            Arc::clone(&self.events),
            Arc::clone(&self.categories),
            Arc::clone(&self.stock),
        );
        availability.execute(self.event_id).await.unwrap().categories[&category.to_lowercase()]
    }
}

#[tokio::test]
async fn basic_reserve_and_confirm() {
    let app = TestApp::new(&[("VIP", 3)], Duration::from_secs(300)).await;

    let reservation = app
        .reserve
        .execute(app.reserve_command("u1", "VIP", 2))
        .await
        .unwrap();
    assert_eq!(reservation.status, "reserved");
    assert_eq!(app.remaining("VIP").await, 1);

    let booking = app
        .confirm
        .execute(ConfirmReservationCommand {
            reservation_id: reservation.id,
            payment_ok: true,
        })
        .await
        .unwrap();
    assert_eq!(booking.payment_status, "paid");
    assert_eq!(booking.reservation_id, reservation.id);

    // Confirmed stock stays claimed and both transitions were published
    assert_eq!(app.remaining("VIP").await, 1);
    assert_eq!(app.publisher.published(topics::TICKET_RESERVED).len(), 1);
    assert_eq!(app.publisher.published(topics::TICKET_CONFIRMED).len(), 1);
}

#[tokio::test]
async fn oversell_is_prevented() {
    let app = TestApp::new(&[("REG", 1)], Duration::from_secs(300)).await;

    let result = app.reserve.execute(app.reserve_command("u1", "REG", 2)).await;
    assert!(matches!(result, Err(TicketingError::OutOfStock)));
    assert_eq!(app.remaining("REG").await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_race_has_exactly_one_winner() {
    let app = TestApp::new(&[("VIP", 1)], Duration::from_secs(300)).await;

    let first = {
        let reserve = Arc::clone(&app.reserve);
        let command = app.reserve_command("u1", "VIP", 1);
        tokio::spawn(async move { reserve.execute(command).await })
    };
    let second = {
        let reserve = Arc::clone(&app.reserve);
        let command = app.reserve_command("u2", "VIP", 1);
        tokio::spawn(async move { reserve.execute(command).await })
    };

    let outcomes = [first.await.unwrap(), second.await.unwrap()];
    let winners = outcomes.iter().filter(|o| o.is_ok()).count();
    let losers = outcomes
        .iter()
        .filter(|o| matches!(o, Err(TicketingError::OutOfStock)))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(losers, 1);
    assert_eq!(app.remaining("VIP").await, 0);
}

#[tokio::test]
async fn expired_hold_is_reclaimed_and_unconfirmable() {
    let app = TestApp::new(&[("VIP", 1)], Duration::from_millis(200)).await;

    let reservation = app
        .reserve
        .execute(app.reserve_command("u1", "VIP", 1))
        .await
        .unwrap();
    assert_eq!(app.remaining("VIP").await, 0);

    // Run the reaper the way the binary does, on a short interval
    let reaper = ExpiryReaper::new(Arc::clone(&app.release), Duration::from_millis(100), 100);
    let token = CancellationToken::new();
    let handle = tokio::spawn(reaper.run(token.clone()));
    tokio::time::sleep(Duration::from_millis(500)).await;
    token.cancel();
    handle.await.unwrap();

    // The restored ticket can be claimed by someone else
    let second = app
        .reserve
        .execute(app.reserve_command("u2", "VIP", 1))
        .await
        .unwrap();
    assert_eq!(second.status, "reserved");

    // The first buyer is too late
    let result = app
        .confirm
        .execute(ConfirmReservationCommand {
            reservation_id: reservation.id,
            payment_ok: true,
        })
        .await;
    assert!(matches!(result, Err(TicketingError::ReservationNotFound(_))));
    assert_eq!(app.publisher.published(topics::TICKET_EXPIRED).len(), 1);
}

#[tokio::test]
async fn payment_failure_restores_stock() {
    let app = TestApp::new(&[("VIP", 5)], Duration::from_secs(300)).await;

    let reservation = app
        .reserve
        .execute(app.reserve_command("u1", "VIP", 2))
        .await
        .unwrap();
    assert_eq!(app.remaining("VIP").await, 3);

    let result = app
        .confirm
        .execute(ConfirmReservationCommand {
            reservation_id: reservation.id,
            payment_ok: false,
        })
        .await;

    assert!(matches!(result, Err(TicketingError::PaymentFailed(_))));
    assert_eq!(app.remaining("VIP").await, 5);
    assert_eq!(app.publisher.published(topics::TICKET_EXPIRED).len(), 1);

    // No booking was created for the failed payment
    let booking = app
        .bookings
        .find_by_reservation_id(ticketing::ReservationId::from_uuid(reservation.id))
        .await
        .unwrap();
    assert!(booking.is_none());
}

#[tokio::test]
async fn repeated_confirm_returns_the_same_booking() {
    let app = TestApp::new(&[("VIP", 3)], Duration::from_secs(300)).await;

    let reservation = app
        .reserve
        .execute(app.reserve_command("u1", "VIP", 1))
        .await
        .unwrap();
    let command = ConfirmReservationCommand {
        reservation_id: reservation.id,
        payment_ok: true,
    };

    let first = app.confirm.execute(command.clone()).await.unwrap();
    let second = app.confirm.execute(command.clone()).await.unwrap();
    let third = app.confirm.execute(command).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.id, third.id);
    assert_eq!(app.remaining("VIP").await, 2);
}

#[tokio::test]
async fn reserve_after_terminal_states_sees_consistent_mirror() {
    let app = TestApp::new(&[("VIP", 2)], Duration::from_secs(300)).await;

    let reservation = app
        .reserve
        .execute(app.reserve_command("u1", "VIP", 1))
        .await
        .unwrap();
    app.confirm
        .execute(ConfirmReservationCommand {
            reservation_id: reservation.id,
            payment_ok: true,
        })
        .await
        .unwrap();

    let mirrored = app
        .reservations
        .find_by_id(ticketing::ReservationId::from_uuid(reservation.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mirrored.status(), ticketing::ReservationStatus::Confirmed);
}

mod queue_shedding {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashMap;

    use ticketing::{EventId, ReservationHold, ReservationId, StockEngine};

    /// Stock engine whose `reserve` parks on a lock the test holds, so a
    /// request can be kept inside the coordinator's critical section.
    struct ParkedStockEngine {
        inner: MemoryStockEngine,
        gate: Arc<tokio::sync::Mutex<()>>,
    }

    #[async_trait]
    impl StockEngine for ParkedStockEngine {
        async fn init_stock(
            &self,
            event_id: EventId,
            category: &str,
            total: u32,
        ) -> Result<(), TicketingError> {
            self.inner.init_stock(event_id, category, total).await
        }

        async fn stock_levels(
            &self,
            event_id: EventId,
            categories: &[String],
        ) -> Result<HashMap<String, u32>, TicketingError> {
            self.inner.stock_levels(event_id, categories).await
        }

        async fn reserve(&self, hold: ReservationHold) -> Result<(), TicketingError> {
            let _parked = self.gate.lock().await;
            self.inner.reserve(hold).await
        }

        async fn get_reservation(
            &self,
            id: ReservationId,
        ) -> Result<ReservationHold, TicketingError> {
            self.inner.get_reservation(id).await
        }

        async fn confirm_reservation(&self, id: ReservationId) -> Result<(), TicketingError> {
            self.inner.confirm_reservation(id).await
        }

        async fn release_reservation(
            &self,
            id: ReservationId,
        ) -> Result<ReservationHold, TicketingError> {
            self.inner.release_reservation(id).await
        }

        async fn release_expired(
            &self,
            now: DateTime<Utc>,
            limit: usize,
        ) -> Result<Vec<ReservationHold>, TicketingError> {
            self.inner.release_expired(now, limit).await
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn one_executes_one_queues_one_is_shed() {
        let categories = Arc::new(MemoryTicketCategoryRepository::new());
        let reservations = Arc::new(MemoryReservationRepository::new());
        let publisher = Arc::new(RecordingEventPublisher::new());
        let park = Arc::new(tokio::sync::Mutex::new(()));
        let stock = Arc::new(ParkedStockEngine {
            inner: MemoryStockEngine::new(),
            gate: Arc::clone(&park),
        });

        let event_id = EventId::new();
        let category =
            ticketing::TicketCategory::create(event_id, "VIP", 10, dec!(50)).unwrap();
        categories.create(&category).await.unwrap();
        stock.init_stock(event_id, "VIP", 10).await.unwrap();

        let gate = Arc::new(AdmissionGate::new(1, 1));
        let reserve = Arc::new(ReserveTicketsUseCase::new(
            Arc::clone(&categories),
            reservations,
            Arc::clone(&stock),
            publisher,
            Arc::clone(&gate),
            Duration::from_secs(300),
            false,
        ));

        let command = |user: &str| ReserveTicketsCommand {
            user_id: user.to_string(),
            event_id: event_id.into_uuid(),
            category: "VIP".to_string(),
            qty: 1,
        };

        // Park the first request inside the critical section.
        let parked = park.lock().await;
        let first = {
            let reserve = Arc::clone(&reserve);
            let command = command("u1");
            tokio::spawn(async move { reserve.execute(command).await })
        };
        while gate.available_workers() > 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // The second request queues for the single worker slot.
        let second = {
            let reserve = Arc::clone(&reserve);
            let command = command("u2");
            tokio::spawn(async move { reserve.execute(command).await })
        };
        while gate.waiting_depth() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // The third request finds the queue full and is shed at once.
        let third = reserve.execute(command("u3")).await;
        assert!(matches!(third, Err(TicketingError::QueueFull)));

        // Unpark: both admitted requests complete.
        drop(parked);
        assert!(first.await.unwrap().is_ok());
        assert!(second.await.unwrap().is_ok());
        assert_eq!(
            stock
                .stock_levels(event_id, &["VIP".to_string()])
                .await
                .unwrap()["VIP"],
            8
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn stock_is_conserved_under_concurrent_load() {
    const TOTAL: u32 = 40;
    let app = TestApp::new(&[("GA", TOTAL)], Duration::from_secs(300)).await;

    let mut tasks = Vec::new();
    for i in 0..60u32 {
        let reserve = Arc::clone(&app.reserve);
        let confirm = Arc::clone(&app.confirm);
        let command = app.reserve_command(&format!("user-{i}"), "GA", 1 + i % 3);
        tasks.push(tokio::spawn(async move {
            let qty = command.qty;
            match reserve.execute(command).await {
                Ok(reservation) => match i % 3 {
                    // confirm
                    0 => {
                        confirm
                            .execute(ConfirmReservationCommand {
                                reservation_id: reservation.id,
                                payment_ok: true,
                            })
                            .await
                            .map(|_| (qty, 0u32))
                            .map_err(|_| ())
                    }
                    // abandon: stays reserved until the reaper runs
                    1 => Ok((0, qty)),
                    // fail payment: released immediately
                    _ => {
                        let _ = confirm
                            .execute(ConfirmReservationCommand {
                                reservation_id: reservation.id,
                                payment_ok: false,
                            })
                            .await;
                        Ok((0, 0))
                    }
                },
                Err(TicketingError::OutOfStock) => Ok((0, 0)),
                Err(_) => Err(()),
            }
        }));
    }

    let mut confirmed = 0u32;
    let mut still_reserved = 0u32;
    for task in tasks {
        let (c, r) = task.await.unwrap().expect("unexpected error");
        confirmed += c;
        still_reserved += r;
    }

    // Conservation while holds are live
    let remaining = app.remaining("GA").await;
    assert_eq!(remaining + still_reserved + confirmed, TOTAL);

    // After reclaiming every live hold, only confirmed stock stays claimed
    let released = app
        .release
        .execute(Utc::now() + chrono::Duration::hours(1), 1000)
        .await
        .unwrap();
    let reclaimed: u32 = released.iter().map(|hold| hold.qty).sum();
    assert_eq!(reclaimed, still_reserved);
    assert_eq!(app.remaining("GA").await + confirmed, TOTAL);
}
