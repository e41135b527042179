//! Remote call errors and HTTP error mapping

use super::FallbackReason;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Errors from a single completion call
///
/// These never leave the completion client; each one is logged and turned
/// into a [`FallbackReason`].
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The call exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body exceeded the size limit
    #[error("Response size {size} exceeds maximum {max}")]
    ResponseTooLarge { size: usize, max: usize },

    /// Response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl RemoteError {
    /// Classify the error for the fallback path
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            Self::Status { status, .. } => FallbackReason::RemoteStatus(*status),
            Self::Parse(_) => FallbackReason::ParseFailed,
            Self::Client(_)
            | Self::Timeout
            | Self::Network(_)
            | Self::ResponseTooLarge { .. } => FallbackReason::RemoteCallFailed,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else if err.is_connect() {
            RemoteError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            RemoteError::Parse(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Parse(err.to_string())
    }
}

/// Map a non-success status and its body to a [`RemoteError`]
pub fn map_http_error(status: StatusCode, body: Option<String>, request_id: Uuid) -> RemoteError {
    let detail = body
        .as_deref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|v| extract_error_message(&v));

    let message = detail
        .or_else(|| body.filter(|b| !b.trim().is_empty()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        });

    RemoteError::Status {
        status: status.as_u16(),
        message: format!("{} [request_id: {}]", message, request_id),
    }
}

/// Extract a human readable message from common provider error bodies
fn extract_error_message(json: &Value) -> Option<String> {
    // OpenAI / OpenRouter format: { "error": { "message": "...", "code": ... } }
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|v| v.as_str())
    {
        return Some(message.to_string());
    }

    // Generic format: { "message": "..." } or { "error": "..." }
    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    json.get("error")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openrouter_error_body() {
        let id = Uuid::new_v4();
        let body = r#"{"error":{"message":"No auth credentials found","code":401}}"#;
        let err = map_http_error(StatusCode::UNAUTHORIZED, Some(body.to_string()), id);

        match err {
            RemoteError::Status { status, message } => {
                assert_eq!(status, 401);
                assert!(message.starts_with("No auth credentials found"));
                assert!(message.contains(&id.to_string()));
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let id = Uuid::new_v4();
        let err = map_http_error(
            StatusCode::BAD_GATEWAY,
            Some("upstream down".to_string()),
            id,
        );
        assert!(err.to_string().contains("upstream down"));

        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, Some(String::new()), id);
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_fallback_reasons() {
        let status = RemoteError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(status.fallback_reason(), FallbackReason::RemoteStatus(500));
        assert_eq!(
            RemoteError::Parse("eof".to_string()).fallback_reason(),
            FallbackReason::ParseFailed
        );
        assert_eq!(
            RemoteError::Timeout.fallback_reason(),
            FallbackReason::RemoteCallFailed
        );
    }
}
