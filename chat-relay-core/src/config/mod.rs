//! Configuration module for the relay
//!
//! Configuration is read once at startup: an optional YAML or JSON file
//! provides the base, environment variables override individual fields, and
//! the result is validated before anything else starts.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{
    apply_env_overrides, API_KEY_VAR, CONFIG_PATH_VAR, MODEL_VAR, PORT_VAR, PROMPT_STRATEGY_VAR,
};
pub use error::{ConfigError, ConfigResult, Problem, ValidationError};
pub use schema::{
    ConnectionConfig, FallbackConfig, PersonaConfig, PromptStrategy, RelayConfig, ServerConfig,
    DEFAULT_ENDPOINT, DEFAULT_MODEL, GENERIC_REPLY_COUNT,
};
pub use secrets::{SafeLogging, SecretString};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<RelayConfig> {
    validated(parse_yaml(path.as_ref())?)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<RelayConfig> {
    validated(parse_json(path.as_ref())?)
}

/// Load a configuration file, picking the format from its extension
pub fn load_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<RelayConfig> {
    validated(read_from_path(path)?)
}

/// Read and parse a configuration file without validating it
///
/// The result may still be incomplete; callers layering overrides on top
/// validate once they are done.
pub fn read_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<RelayConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(path),
        _ => parse_json(path),
    }
}

/// Load the process configuration from the real environment
pub fn load_from_env() -> ConfigResult<RelayConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using a custom variable lookup
///
/// `CHAT_RELAY_CONFIG` names an optional base file; the remaining variables
/// override it field by field. Validation runs on the merged result only.
pub fn load_with<F>(lookup: F) -> ConfigResult<RelayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(CONFIG_PATH_VAR).filter(|p| !p.trim().is_empty()) {
        Some(path) => read_from_path(path.trim())?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup)?;
    validated(config)
}

fn validated(config: RelayConfig) -> ConfigResult<RelayConfig> {
    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

fn parse_yaml(path: &Path) -> ConfigResult<RelayConfig> {
    let interpolated = read_interpolated(path)?;
    serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_json(path: &Path) -> ConfigResult<RelayConfig> {
    let interpolated = read_interpolated(path)?;
    serde_json::from_str(&interpolated).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_interpolated(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    env::interpolate_env_vars(&content, |key| std::env::var(key).ok())
}
