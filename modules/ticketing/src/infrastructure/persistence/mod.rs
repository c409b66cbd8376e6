mod pg_booking_repository;
mod pg_concert_event_repository;
mod pg_reservation_repository;
mod pg_ticket_category_repository;

pub use pg_booking_repository::PgBookingRepository;
pub use pg_concert_event_repository::PgConcertEventRepository;
pub use pg_reservation_repository::PgReservationRepository;
pub use pg_ticket_category_repository::PgTicketCategoryRepository;
