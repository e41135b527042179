//! Errors that reach the caller of the relay

use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors surfaced to the HTTP caller
///
/// Remote provider failures never appear here; they are absorbed by the
/// offline fallback.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request carried no usable message
    #[error("missing message")]
    MissingMessage,

    /// Anything else that went wrong locally
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingMessage)
    }

    /// Message placed in the `error` field of the response body
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingMessage => "missing message",
            Self::Internal(_) => "Server error",
        }
    }
}
