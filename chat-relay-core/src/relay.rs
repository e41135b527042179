//! The relay service
//!
//! Wires the pipeline together for one request: receiver, prompt builder,
//! completion client, then either the response resolver or the offline
//! fallback. Holds only immutable state, so one instance serves every
//! request concurrently.

use crate::config::RelayConfig;
use crate::error::RelayResult;
use crate::fallback::OfflineFallback;
use crate::http::{
    CompletionExecutor, CompletionOutcome, HttpCompletionClient, RemoteError, RequestOptions,
};
use crate::prompt::PromptBuilder;
use crate::protocol::{ChatReply, ChatRequest};
use crate::receiver;
use crate::resolver::resolve_reply;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback,
}

/// Chat relay service
pub struct ChatRelay {
    prompt: PromptBuilder,
    executor: Arc<dyn CompletionExecutor>,
    fallback: OfflineFallback,
}

impl ChatRelay {
    pub fn new(
        prompt: PromptBuilder,
        executor: Arc<dyn CompletionExecutor>,
        fallback: OfflineFallback,
    ) -> Self {
        Self {
            prompt,
            executor,
            fallback,
        }
    }

    /// Build the production relay from configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, RemoteError> {
        let client = HttpCompletionClient::from_config(config)?;
        Ok(Self::new(
            PromptBuilder::from_config(config),
            Arc::new(client),
            OfflineFallback::from_config(&config.fallback),
        ))
    }

    /// Replace the offline fallback engine
    pub fn with_fallback(mut self, fallback: OfflineFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> &OfflineFallback {
        &self.fallback
    }

    /// Handle a raw request body
    pub async fn handle_body(&self, body: &[u8]) -> RelayResult<ChatReply> {
        let request = receiver::parse_body(body)?;
        Ok(self.respond(&request).await)
    }

    /// Handle an already parsed JSON body
    pub async fn handle_json(&self, body: &Value) -> RelayResult<ChatReply> {
        let request = receiver::from_json(body)?;
        Ok(self.respond(&request).await)
    }

    /// Produce a reply for a validated request
    ///
    /// Remote failures are absorbed here, so this never fails.
    pub async fn respond(&self, request: &ChatRequest) -> ChatReply {
        let (reply, _) = self.respond_with_source(request).await;
        reply
    }

    /// Like [`respond`](Self::respond), also reporting where the reply came from
    pub async fn respond_with_source(&self, request: &ChatRequest) -> (ChatReply, ReplySource) {
        let request_id = Uuid::new_v4();
        debug!(
            "Handling chat message of {} chars [request_id: {}]",
            request.message.chars().count(),
            request_id
        );

        let payload = self.prompt.build(request);
        let options = RequestOptions::new().with_request_id(request_id);

        match self.executor.complete(&payload, options).await {
            CompletionOutcome::Completed(result) => {
                info!("Replying from remote model [request_id: {}]", request_id);
                (ChatReply::new(resolve_reply(&result)), ReplySource::Remote)
            }
            CompletionOutcome::Fallback(reason) => {
                info!(
                    "Replying from offline fallback ({}) [request_id: {}]",
                    reason, request_id
                );
                (
                    ChatReply::new(self.fallback.reply(&request.message)),
                    ReplySource::Fallback,
                )
            }
        }
    }
}
