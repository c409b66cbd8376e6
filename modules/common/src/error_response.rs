// JSON error body shared by all API responses

use serde::Serialize;

/// Error body returned by every failing API endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "OUT_OF_STOCK")
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error with a custom message.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates an internal error. Internal details are never exposed here.
    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal error")
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }
}
