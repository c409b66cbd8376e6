mod memory_booking_repository;
mod memory_concert_event_repository;
mod memory_reservation_repository;
mod memory_stock_engine;
mod memory_ticket_category_repository;
mod recording_event_publisher;

pub use memory_booking_repository::MemoryBookingRepository;
pub use memory_concert_event_repository::MemoryConcertEventRepository;
pub use memory_reservation_repository::MemoryReservationRepository;
pub use memory_stock_engine::MemoryStockEngine;
pub use memory_ticket_category_repository::MemoryTicketCategoryRepository;
pub use recording_event_publisher::{PublishedRecord, RecordingEventPublisher};
