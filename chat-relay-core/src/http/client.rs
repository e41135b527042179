//! HTTP completion client implementation using reqwest

use crate::config::{RelayConfig, SecretString};
use crate::http::error::{map_http_error, RemoteError};
use crate::http::{CompletionExecutor, CompletionOutcome, FallbackReason, RequestOptions};
use crate::protocol::{CompletionPayload, CompletionResult};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Maximum response size (2MB)
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024;

/// Default user agent
const USER_AGENT: &str = concat!("chat-relay/", env!("CARGO_PKG_VERSION"));

/// Completion client backed by a pooled reqwest client
#[derive(Clone)]
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    referer: Option<String>,
    title: Option<String>,
    max_response_size: usize,
}

impl HttpCompletionClient {
    /// Create a client from the relay configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, RemoteError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(config.connection.connect_timeout())
            .timeout(config.connection.timeout())
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| RemoteError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            referer: config.connection.referer.clone(),
            title: config.connection.title.clone(),
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    /// Whether calls will be skipped because no credential is configured
    pub fn is_offline(&self) -> bool {
        self.api_key.is_empty()
    }

    async fn send(
        &self,
        payload: &CompletionPayload,
        options: &RequestOptions,
    ) -> Result<CompletionResult, RemoteError> {
        let request_id = options.request_id;
        debug!("Request URL: {} [request_id: {}]", self.endpoint, request_id);

        let mut req_builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("X-Request-ID", request_id.to_string())
            .json(payload);

        if let Some(timeout) = options.timeout {
            req_builder = req_builder.timeout(timeout);
        }
        // OpenRouter app attribution
        if let Some(ref referer) = self.referer {
            req_builder = req_builder.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.title {
            req_builder = req_builder.header("X-Title", title);
        }

        let response = req_builder.send().await.map_err(RemoteError::from)?;

        let status = response.status();
        debug!("Response status: {} [request_id: {}]", status, request_id);

        if !status.is_success() {
            // Body is only read for diagnostics
            let body = response.text().await.ok();
            return Err(map_http_error(status, body, request_id));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_size {
                return Err(RemoteError::ResponseTooLarge {
                    size: content_length as usize,
                    max: self.max_response_size,
                });
            }
        }

        let bytes = response.bytes().await.map_err(RemoteError::from)?;
        if bytes.len() > self.max_response_size {
            return Err(RemoteError::ResponseTooLarge {
                size: bytes.len(),
                max: self.max_response_size,
            });
        }

        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(CompletionResult::new(value))
    }
}

#[async_trait]
impl CompletionExecutor for HttpCompletionClient {
    async fn complete(
        &self,
        payload: &CompletionPayload,
        options: RequestOptions,
    ) -> CompletionOutcome {
        let request_id = options.request_id;

        if self.is_offline() {
            debug!("No API key configured, skipping remote call [request_id: {}]", request_id);
            return CompletionOutcome::Fallback(FallbackReason::Offline);
        }

        info!(
            "Calling completion endpoint with model {} [request_id: {}]",
            payload.model, request_id
        );

        match self.send(payload, &options).await {
            Ok(result) => {
                info!("Completion succeeded [request_id: {}]", request_id);
                CompletionOutcome::Completed(result)
            }
            Err(err) => {
                match &err {
                    RemoteError::Status { .. } | RemoteError::Timeout => {
                        warn!("Completion call failed [request_id: {}]: {}", request_id, err)
                    }
                    _ => error!("Completion call error [request_id: {}]: {}", request_id, err),
                }
                CompletionOutcome::Fallback(err.fallback_reason())
            }
        }
    }
}
