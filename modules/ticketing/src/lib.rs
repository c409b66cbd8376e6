// Ticketing module - event inventory, timed reservation holds, and bookings
//
// Clean Architecture layers:
// - domain: Entities, value objects, repository traits, service traits
// - application: Use cases, DTOs, admission gate, expiry reaper
// - infrastructure: In-memory backends, PostgreSQL repositories, Kafka producer

pub mod application;
pub mod domain;
pub mod infrastructure;

mod error;

// =============================================================================
// Public API - Re-exports for convenient access
// =============================================================================

// Error type
pub use error::TicketingError;

// Domain Layer - Entities
pub use domain::entities::{Booking, ConcertEvent, Reservation, TicketCategory};

// Domain Layer - Value Objects
pub use domain::value_objects::{
    BookingId, CategoryId, EventId, ReservationId, ReservationStatus,
};

// Domain Layer - Repository Traits
pub use domain::repositories::{
    BookingRepository, ConcertEventRepository, ReservationRepository,
    TicketCategoryRepository,
};

// Domain Layer - Service Traits
pub use domain::services::{topics, EventPublisher, ExpiryNotice, ReservationHold, StockEngine};

// Application Layer - Use Cases
pub use application::admission::{AdmissionGate, AdmissionPermit};
pub use application::reaper::ExpiryReaper;
pub use application::use_cases::{
    ConfirmReservationUseCase, CreateCategoryUseCase, CreateEventUseCase,
    GetAvailabilityUseCase, ReleaseExpiredUseCase, ReserveTicketsUseCase,
};

// Application Layer - DTOs
pub use application::dtos::commands::{
    ConfirmReservationCommand, CreateCategoryCommand, CreateEventCommand, ReserveTicketsCommand,
};
pub use application::dtos::responses::{
    AvailabilityResponse, BookingResponse, CategoryResponse, EventResponse, ReservationResponse,
};

// Infrastructure Layer
pub use infrastructure::memory::{
    MemoryBookingRepository, MemoryConcertEventRepository, MemoryReservationRepository,
    MemoryStockEngine, MemoryTicketCategoryRepository, RecordingEventPublisher,
};
pub use infrastructure::messaging::{ensure_topics, KafkaEventPublisher};
pub use infrastructure::persistence::{
    PgBookingRepository, PgConcertEventRepository, PgReservationRepository,
    PgTicketCategoryRepository,
};
