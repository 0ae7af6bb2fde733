//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No response received (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Caller-side precondition failed; the action is blocked until corrected.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A submit/save batch is already running.
    #[error("Another request is already in progress")]
    Busy,

    /// Response body or field outside the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Request timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// Catalog is in the failed state; only an explicit retry clears it.
    #[error("Objective catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Report error: {0}")]
    Report(String),

    /// Terminal prompt failed or was interrupted.
    #[error("Input error: {0}")]
    Input(String),
}
