//! Configuration validation utilities

use super::error::ValidationError;
use super::schema::{RelayConfig, GENERIC_REPLY_COUNT};
use url::Url;

/// Configuration validator run once after loading
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration
    pub fn validate(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        self.validate_endpoint(config)?;
        self.validate_model(config)?;
        self.validate_server(config)?;
        self.validate_connection(config)?;
        self.validate_persona(config)?;
        self.validate_fallback(config)?;
        Ok(())
    }

    fn validate_endpoint(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        let url = Url::parse(&config.endpoint)
            .map_err(|e| ValidationError::bad_url("endpoint", e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ValidationError::bad_url(
                "endpoint",
                format!("unsupported scheme '{}'", scheme),
            )),
        }
    }

    fn validate_model(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        if config.model.trim().is_empty() {
            return Err(ValidationError::blank("model"));
        }
        Ok(())
    }

    fn validate_server(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        if config.server.port == 0 {
            return Err(ValidationError::out_of_range(
                "server.port",
                "port must be between 1 and 65535",
            ));
        }
        if config.server.host.trim().is_empty() {
            return Err(ValidationError::blank("server.host"));
        }
        Ok(())
    }

    fn validate_connection(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        if config.connection.timeout_secs == 0 {
            return Err(ValidationError::out_of_range(
                "connection.timeout_secs",
                "timeout must be at least 1 second",
            ));
        }
        if config.connection.connect_timeout_secs == 0 {
            return Err(ValidationError::out_of_range(
                "connection.connect_timeout_secs",
                "connect timeout must be at least 1 second",
            ));
        }
        if config.connection.connect_timeout_secs > config.connection.timeout_secs {
            return Err(ValidationError::out_of_range(
                "connection.connect_timeout_secs",
                format!(
                    "connect timeout {}s exceeds the request timeout {}s",
                    config.connection.connect_timeout_secs, config.connection.timeout_secs
                ),
            ));
        }
        Ok(())
    }

    fn validate_persona(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        if config.persona.name.trim().is_empty() {
            return Err(ValidationError::blank("persona.name"));
        }
        if config.persona.instruction.trim().is_empty() {
            return Err(ValidationError::blank("persona.instruction"));
        }
        Ok(())
    }

    fn validate_fallback(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        let fallback = &config.fallback;
        if fallback.generic_replies.len() != GENERIC_REPLY_COUNT {
            return Err(ValidationError::wrong_count(
                "fallback.generic_replies",
                GENERIC_REPLY_COUNT,
                fallback.generic_replies.len(),
            ));
        }
        if let Some(index) = fallback
            .generic_replies
            .iter()
            .position(|r| r.trim().is_empty())
        {
            return Err(ValidationError::blank(format!(
                "fallback.generic_replies[{}]",
                index
            )));
        }
        for (field, reply) in [
            ("fallback.identity_reply", &fallback.identity_reply),
            ("fallback.name_reply", &fallback.name_reply),
            ("fallback.wellbeing_reply", &fallback.wellbeing_reply),
        ] {
            if reply.trim().is_empty() {
                return Err(ValidationError::blank(field));
            }
        }
        Ok(())
    }
}
