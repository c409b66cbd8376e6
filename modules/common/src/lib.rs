// Shared types used by every HTTP-facing crate: health check, error body.

pub mod error_response;
pub mod health;

pub use error_response::ErrorResponse;
pub use health::{HealthCheckUseCase, HealthState, HealthStatus};
