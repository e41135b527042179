//! Protocol module for the relay's request/response structures
//!
//! Inbound types (`ChatRequest`, `ChatReply`, `ErrorResponse`) describe the
//! relay's own HTTP API; outbound types (`CompletionPayload`,
//! `CompletionResult`) describe the completion provider's API.

pub mod types;

pub use types::{
    ChatReply, ChatRequest, CompletionPayload, CompletionResult, ErrorResponse, MessageRole,
    PayloadMessage,
};
