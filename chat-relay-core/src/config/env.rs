//! Environment variable handling for configuration
//!
//! Two mechanisms live here: `${VAR}` interpolation inside config files, and
//! the per-field overrides read from the process environment at startup.
//! Both take a lookup function so tests never have to mutate the real
//! environment.

use super::error::ConfigError;
use super::schema::{PromptStrategy, RelayConfig};
use super::secrets::SecretString;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "OPENROUTER_MODEL";
pub const ENDPOINT_VAR: &str = "CHAT_RELAY_ENDPOINT";
pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "CHAT_RELAY_HOST";
pub const BANNER_VAR: &str = "CHAT_RELAY_BANNER";
pub const PERSONA_NAME_VAR: &str = "CHAT_RELAY_PERSONA_NAME";
pub const PERSONA_VAR: &str = "CHAT_RELAY_PERSONA";
pub const PROMPT_STRATEGY_VAR: &str = "CHAT_RELAY_PROMPT_STRATEGY";
pub const MAX_TOKENS_VAR: &str = "CHAT_RELAY_MAX_TOKENS";
pub const TIMEOUT_VAR: &str = "CHAT_RELAY_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "CHAT_RELAY_CONNECT_TIMEOUT_SECS";
pub const REFERER_VAR: &str = "CHAT_RELAY_REFERER";
pub const TITLE_VAR: &str = "CHAT_RELAY_TITLE";
pub const CONFIG_PATH_VAR: &str = "CHAT_RELAY_CONFIG";

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
});

/// Interpolate `${VAR}` references in a configuration string
pub fn interpolate_env_vars<F>(content: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing_vars = Vec::new();

    let result = ENV_VAR_PATTERN.replace_all(content, |cap: &regex::Captures<'_>| {
        let var_name = &cap[1];
        match lookup(var_name) {
            Some(value) => value,
            None => {
                missing_vars.push(var_name.to_string());
                String::new()
            }
        }
    });

    // Report the first missing variable
    if let Some(var) = missing_vars.into_iter().next() {
        return Err(ConfigError::UnsetVariable { var });
    }

    Ok(result.into_owned())
}

/// Apply environment overrides on top of a base configuration
///
/// Unset or empty variables leave the field untouched, except the API key,
/// where an empty value explicitly selects offline mode.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(key) = lookup(API_KEY_VAR) {
        config.api_key = SecretString::new(key.trim());
    }
    if let Some(model) = non_empty(MODEL_VAR) {
        config.model = model;
    }
    if let Some(endpoint) = non_empty(ENDPOINT_VAR) {
        config.endpoint = endpoint;
    }
    if let Some(port) = non_empty(PORT_VAR) {
        config.server.port = parse_var(PORT_VAR, &port)?;
    }
    if let Some(host) = non_empty(HOST_VAR) {
        config.server.host = host;
    }
    if let Some(banner) = non_empty(BANNER_VAR) {
        config.server.banner = Some(banner);
    }
    if let Some(name) = non_empty(PERSONA_NAME_VAR) {
        config.persona.name = name;
    }
    if let Some(instruction) = non_empty(PERSONA_VAR) {
        config.persona.instruction = instruction;
    }
    if let Some(strategy) = non_empty(PROMPT_STRATEGY_VAR) {
        config.persona.strategy = parse_var::<PromptStrategy>(PROMPT_STRATEGY_VAR, &strategy)?;
    }
    if let Some(max_tokens) = non_empty(MAX_TOKENS_VAR) {
        config.persona.max_tokens = parse_var(MAX_TOKENS_VAR, &max_tokens)?;
    }
    if let Some(timeout) = non_empty(TIMEOUT_VAR) {
        config.connection.timeout_secs = parse_var(TIMEOUT_VAR, &timeout)?;
    }
    if let Some(timeout) = non_empty(CONNECT_TIMEOUT_VAR) {
        config.connection.connect_timeout_secs = parse_var(CONNECT_TIMEOUT_VAR, &timeout)?;
    }
    if let Some(referer) = non_empty(REFERER_VAR) {
        config.connection.referer = Some(referer);
    }
    if let Some(title) = non_empty(TITLE_VAR) {
        config.connection.title = Some(title);
    }

    Ok(())
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::BadVariable {
            var: var.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_interpolate_env_vars() {
        let lookup = lookup_from(&[("TEST_VAR", "test_value")]);
        let result = interpolate_env_vars("api_key: ${TEST_VAR}", lookup).unwrap();
        assert_eq!(result, "api_key: test_value");
    }

    #[test]
    fn test_missing_env_var() {
        let result = interpolate_env_vars("api_key: ${MISSING_VAR}", lookup_from(&[]));

        if let Err(ConfigError::UnsetVariable { var }) = result {
            assert_eq!(var, "MISSING_VAR");
        } else {
            panic!("Expected UnsetVariable error");
        }
    }

    #[test]
    fn test_multiple_env_vars() {
        let lookup = lookup_from(&[("VAR1", "value1"), ("VAR2", "value2")]);
        let result = interpolate_env_vars("key1: ${VAR1}, key2: ${VAR2}", lookup).unwrap();
        assert_eq!(result, "key1: value1, key2: value2");
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = RelayConfig::default();
        let lookup = lookup_from(&[
            (API_KEY_VAR, " sk-or-test-key "),
            (MODEL_VAR, "google/gemini-2.0-flash-lite"),
            (PORT_VAR, "3000"),
            (PROMPT_STRATEGY_VAR, "single"),
            (TIMEOUT_VAR, "20"),
            (TITLE_VAR, "Moon AI"),
        ]);

        apply_env_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.api_key.expose_secret(), "sk-or-test-key");
        assert_eq!(config.model, "google/gemini-2.0-flash-lite");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.persona.strategy, PromptStrategy::Single);
        assert_eq!(config.connection.timeout_secs, 20);
        assert_eq!(config.connection.title.as_deref(), Some("Moon AI"));
        assert!(!config.is_offline());
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config, lookup_from(&[(MODEL_VAR, ""), (PORT_VAR, " ")]))
            .unwrap();

        assert_eq!(config.model, "gpt-3.5-mini");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_empty_api_key_selects_offline() {
        let mut config = RelayConfig {
            api_key: SecretString::new("sk-from-file"),
            ..Default::default()
        };
        apply_env_overrides(&mut config, lookup_from(&[(API_KEY_VAR, "")])).unwrap();
        assert!(config.is_offline());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = RelayConfig::default();
        let result = apply_env_overrides(&mut config, lookup_from(&[(PORT_VAR, "http")]));

        match result {
            Err(ConfigError::BadVariable { var, .. }) => assert_eq!(var, PORT_VAR),
            other => panic!("Expected BadVariable, got {:?}", other),
        }
    }
}
