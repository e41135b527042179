//! Completion client module
//!
//! This module implements the single outbound call of the relay:
//! - Offline detection (no credential configured)
//! - Request/response handling against the completion endpoint
//! - Classification of every failure into a fallback signal
//! - Request ID generation and correlation

pub mod client;
pub mod error;

pub use client::HttpCompletionClient;
pub use error::RemoteError;

use crate::protocol::{CompletionPayload, CompletionResult};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Why the remote reply could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No credential configured; the call was never attempted
    Offline,
    /// Network failure, timeout or unreadable body
    RemoteCallFailed,
    /// Provider answered with a non-success status
    RemoteStatus(u16),
    /// Success status but the body was not JSON
    ParseFailed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => write!(f, "offline mode"),
            Self::RemoteCallFailed => write!(f, "remote call failed"),
            Self::RemoteStatus(status) => write!(f, "remote returned HTTP {}", status),
            Self::ParseFailed => write!(f, "remote response was not JSON"),
        }
    }
}

/// Result of one completion attempt
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Success status with a JSON body
    Completed(CompletionResult),
    /// The caller should use the offline fallback
    Fallback(FallbackReason),
}

/// Options for a single completion call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Unique request ID for correlation
    pub request_id: Uuid,

    /// Per-call timeout overriding the client default
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timeout: None,
        }
    }
}

impl RequestOptions {
    /// Create new request options with a generated request ID
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing request ID
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Set the timeout for this request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Executes completion calls
///
/// Implementations never return errors: every failure becomes
/// [`CompletionOutcome::Fallback`].
#[async_trait]
pub trait CompletionExecutor: Send + Sync {
    async fn complete(
        &self,
        payload: &CompletionPayload,
        options: RequestOptions,
    ) -> CompletionOutcome;
}
