mod confirm_reservation_use_case;
mod create_category_use_case;
mod create_event_use_case;
mod get_availability_use_case;
mod release_expired_use_case;
mod reserve_tickets_use_case;

pub use confirm_reservation_use_case::ConfirmReservationUseCase;
pub use create_category_use_case::CreateCategoryUseCase;
pub use create_event_use_case::CreateEventUseCase;
pub use get_availability_use_case::GetAvailabilityUseCase;
pub use release_expired_use_case::ReleaseExpiredUseCase;
pub use reserve_tickets_use_case::ReserveTicketsUseCase;
