mod booking_repository;
mod concert_event_repository;
mod reservation_repository;
mod ticket_category_repository;

pub use booking_repository::BookingRepository;
pub use concert_event_repository::ConcertEventRepository;
pub use reservation_repository::ReservationRepository;
pub use ticket_category_repository::TicketCategoryRepository;
