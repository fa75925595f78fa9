//! Error types for the memoir domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Backend errors never
//! escape the recall facade — they are recovered there and reflected in the
//! circuit-breaker counters instead.

use thiserror::Error;

/// Failures a [`crate::ContextStore`] backend can report.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
