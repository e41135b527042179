//! Wire types for the inbound chat API and the outbound completion API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message in the completion payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Persona instructions
    System,
    /// User input
    User,
}

/// A single message in the completion payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadMessage {
    pub role: MessageRole,
    pub content: String,
}

impl PayloadMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Body of the outbound completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPayload {
    pub model: String,
    pub messages: Vec<PayloadMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A validated inbound chat message
///
/// Only ever constructed by the receiver, so `message` is non-blank and
/// within the length cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Raw JSON returned by the completion provider
///
/// Providers disagree on the response schema, so nothing is assumed about
/// its shape. Every accessor returns `None` on a missing or mistyped field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionResult(Value);

impl CompletionResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn first_choice(&self) -> Option<&Value> {
        self.0.get("choices")?.as_array()?.first()
    }

    /// `choices[0].message.content`
    pub fn message_content(&self) -> Option<&str> {
        self.first_choice()?.get("message")?.get("content")?.as_str()
    }

    /// `choices[0].text`
    pub fn choice_text(&self) -> Option<&str> {
        self.first_choice()?.get("text")?.as_str()
    }

    /// `output`
    pub fn output(&self) -> Option<&str> {
        self.0.get("output")?.as_str()
    }
}

impl From<Value> for CompletionResult {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_serialization_omits_unset_max_tokens() {
        let payload = CompletionPayload {
            model: "gpt-3.5-mini".to_string(),
            messages: vec![PayloadMessage::system("be nice"), PayloadMessage::user("hi")],
            max_tokens: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-3.5-mini",
                "messages": [
                    {"role": "system", "content": "be nice"},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn test_completion_result_accessors() {
        let chat = CompletionResult::new(json!({"choices": [{"message": {"content": "Hola"}}]}));
        assert_eq!(chat.message_content(), Some("Hola"));
        assert_eq!(chat.choice_text(), None);

        let legacy = CompletionResult::new(json!({"choices": [{"text": "Ciao"}]}));
        assert_eq!(legacy.message_content(), None);
        assert_eq!(legacy.choice_text(), Some("Ciao"));

        let output = CompletionResult::new(json!({"output": "Bonjour"}));
        assert_eq!(output.output(), Some("Bonjour"));
    }

    #[test]
    fn test_completion_result_tolerates_wrong_types() {
        let odd = CompletionResult::new(json!({
            "choices": {"message": "not an array"},
            "output": 42
        }));
        assert_eq!(odd.message_content(), None);
        assert_eq!(odd.choice_text(), None);
        assert_eq!(odd.output(), None);

        let not_object = CompletionResult::new(json!(["choices"]));
        assert_eq!(not_object.message_content(), None);
    }
}
