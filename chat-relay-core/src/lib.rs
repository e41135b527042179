//! Chat Relay Core Library
//!
//! This crate forwards a user's chat message to an LLM completion API and
//! returns the reply, falling back to local canned replies whenever the
//! remote model is unavailable or unconfigured.

pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod prompt;
pub mod protocol;
pub mod receiver;
pub mod relay;
pub mod resolver;

pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use relay::{ChatRelay, ReplySource};

/// Returns the version of the chat relay core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
