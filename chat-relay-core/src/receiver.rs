//! Inbound request parsing and validation

use crate::error::{RelayError, RelayResult};
use crate::protocol::ChatRequest;
use serde_json::Value;

/// Maximum number of characters of a user message passed downstream
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Parse a raw request body into a validated [`ChatRequest`]
///
/// Bodies that are not JSON objects are treated like bodies without a
/// message.
pub fn parse_body(body: &[u8]) -> RelayResult<ChatRequest> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::MissingMessage)?;
    from_json(&value)
}

/// Extract, coerce and cap the `message` field of a JSON body
pub fn from_json(body: &Value) -> RelayResult<ChatRequest> {
    let text = body
        .as_object()
        .and_then(|obj| obj.get("message"))
        .map(coerce_to_text)
        .unwrap_or_default();

    let message = truncate_chars(&text, MAX_MESSAGE_CHARS);
    if message.trim().is_empty() {
        return Err(RelayError::MissingMessage);
    }

    Ok(ChatRequest {
        message: message.to_string(),
    })
}

/// Render a loosely typed JSON value as message text
///
/// `null`, `false` and numeric zero are treated as absent.
pub fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Truncate to at most `max` characters without splitting a character
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
