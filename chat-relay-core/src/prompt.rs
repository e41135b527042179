//! Prompt construction
//!
//! Turns a validated [`ChatRequest`] into the [`CompletionPayload`] sent to
//! the provider. Pure: the same request and persona always give the same
//! payload.

use crate::config::{PersonaConfig, PromptStrategy, RelayConfig};
use crate::protocol::{ChatRequest, CompletionPayload, PayloadMessage};

/// Builds completion payloads for one persona and model
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    model: String,
    persona: PersonaConfig,
}

impl PromptBuilder {
    pub fn new(model: impl Into<String>, persona: PersonaConfig) -> Self {
        Self {
            model: model.into(),
            persona,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.model.clone(), config.persona.clone())
    }

    /// Build the payload for a request
    pub fn build(&self, request: &ChatRequest) -> CompletionPayload {
        let messages = match self.persona.strategy {
            PromptStrategy::Single => vec![PayloadMessage::user(format!(
                "{} User: \"{}\"",
                self.persona.preamble(),
                escape_quoted(&request.message)
            ))],
            PromptStrategy::SystemUser => vec![
                PayloadMessage::system(self.persona.preamble()),
                PayloadMessage::user(request.message.clone()),
            ],
        };

        CompletionPayload {
            model: self.model.clone(),
            messages,
            max_tokens: Some(self.persona.max_tokens).filter(|&n| n > 0),
        }
    }
}

/// Escape text for embedding inside a double-quoted prompt fragment
fn escape_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
