//! HTTP request handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_relay_core::config::RelayConfig;
use chat_relay_core::http::RemoteError;
use chat_relay_core::protocol::{ChatReply, ErrorResponse};
use chat_relay_core::{ChatRelay, RelayError};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    pub banner: Arc<str>,
}

impl AppState {
    pub fn new(relay: ChatRelay, banner: impl Into<Arc<str>>) -> Self {
        Self {
            relay: Arc::new(relay),
            banner: banner.into(),
        }
    }

    /// Build the production state: live relay plus the configured banner.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RemoteError> {
        Ok(Self::new(ChatRelay::from_config(config)?, banner_for(config)))
    }
}

/// Health banner text, defaulting to one derived from the persona name.
pub fn banner_for(config: &RelayConfig) -> String {
    config
        .server
        .banner
        .clone()
        .unwrap_or_else(|| format!("🚀 {} backend running", config.persona.name))
}

/// Relay errors rendered as `{"error": ...}` bodies.
pub struct ApiError(pub RelayError);

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!("request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse::new(self.0.public_message()))).into_response()
    }
}

/// GET / and /health - plain text banner.
pub async fn health(State(state): State<AppState>) -> String {
    state.banner.to_string()
}

/// POST /api/chat and /chat - relay one message.
///
/// The body is taken as raw bytes so malformed JSON gets the same 400 as a
/// missing message instead of axum's extractor rejection.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatReply>, ApiError> {
    debug!("chat request: {} bytes", body.len());
    let reply = state.relay.handle_body(&body).await?;
    Ok(Json(reply))
}

/// Turn a handler panic into a 500 with the generic error body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError(RelayError::Internal(detail)).into_response()
}
