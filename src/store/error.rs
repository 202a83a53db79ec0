use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by record store operations.
///
/// Every variant is recoverable at the level of a single record: the
/// orchestrator logs it and moves on.
pub enum StoreError {
    /// The store answered with something other than `200 OK`.
    #[error("{method} {path} returned status {status}")]
    Status {
        /// HTTP method.
        method: &'static str,
        /// Request path relative to the base URL.
        path: String,
        /// Status code received.
        status: u16,
        /// Response body, if any (for diagnostics).
        body: String,
    },

    /// The request never produced a response (connect, timeout, TLS...).
    #[error("{method} {path} failed: {message}")]
    Transport {
        /// HTTP method.
        method: &'static str,
        /// Request path relative to the base URL.
        path: String,
        /// Error message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response of {method} {path}: {message}")]
    Decode {
        /// HTTP method.
        method: &'static str,
        /// Request path relative to the base URL.
        path: String,
        /// Error message.
        message: String,
    },

    /// A record did not have the shape needed to apply an update.
    #[error("invalid record {path}: {reason}")]
    InvalidRecord {
        /// Record path.
        path: String,
        /// What was wrong.
        reason: String,
    },
}

impl StoreError {
    /// Returns the HTTP status for [`StoreError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
