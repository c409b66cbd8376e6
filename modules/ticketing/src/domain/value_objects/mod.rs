mod booking_id;
mod category_id;
mod event_id;
mod reservation_id;
mod reservation_status;

pub use booking_id::BookingId;
pub use category_id::CategoryId;
pub use event_id::EventId;
pub use reservation_id::ReservationId;
pub use reservation_status::ReservationStatus;
