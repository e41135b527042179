//! Reply extraction from provider responses

use crate::protocol::CompletionResult;
use crate::receiver::truncate_chars;

/// Cap on the raw-JSON reply used when no known shape matches
pub const MAX_RAW_REPLY_CHARS: usize = 2000;

/// Extract the reply text from a successful completion result
///
/// Shapes are tried in order and the first hit wins:
/// `choices[0].message.content`, `choices[0].text`, then `output`. An
/// unrecognised body is returned as truncated JSON text.
pub fn resolve_reply(result: &CompletionResult) -> String {
    if let Some(content) = result.message_content().filter(|s| !s.is_empty()) {
        return content.to_string();
    }
    if let Some(text) = result.choice_text().filter(|s| !s.is_empty()) {
        return text.to_string();
    }
    // An empty `output` string is still a recognised shape
    if let Some(output) = result.output() {
        return output.to_string();
    }

    let raw = result.as_value().to_string();
    truncate_chars(&raw, MAX_RAW_REPLY_CHARS).to_string()
}
