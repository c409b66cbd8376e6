mod booking;
mod concert_event;
mod reservation;
mod ticket_category;

pub use booking::Booking;
pub use concert_event::ConcertEvent;
pub use reservation::Reservation;
pub use ticket_category::TicketCategory;
