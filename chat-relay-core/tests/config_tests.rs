//! Integration tests for configuration loading and validation

use chat_relay_core::config::{
    load_from_json, load_from_path, load_from_yaml, load_with, read_from_path, ConfigError, PromptStrategy,
    API_KEY_VAR, CONFIG_PATH_VAR, MODEL_VAR, PORT_VAR,
};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test config file
fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn lookup_from(pairs: Vec<(&str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_load_valid_yaml_config() {
    std::env::set_var("CHAT_RELAY_TEST_YAML_KEY", "sk-or-yaml-key");

    let yaml = r#"
api_key: ${CHAT_RELAY_TEST_YAML_KEY}
model: google/gemini-2.0-flash-lite
endpoint: https://openrouter.ai/api/v1/chat/completions
server:
  port: 3000
persona:
  name: Girlfriend AI
  instruction: Be a friendly AI girlfriend for the user.
  strategy: system_user
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.api_key.expose_secret(), "sk-or-yaml-key");
    assert_eq!(config.model, "google/gemini-2.0-flash-lite");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.persona.name, "Girlfriend AI");
    assert_eq!(config.persona.strategy, PromptStrategy::SystemUser);
    // Untouched sections keep their defaults
    assert_eq!(config.connection.timeout_secs, 10);
    assert_eq!(config.fallback.generic_replies.len(), 3);

    std::env::remove_var("CHAT_RELAY_TEST_YAML_KEY");
}

#[test]
fn test_load_valid_json_config() {
    let json = r#"{
  "model": "gpt-3.5-mini",
  "persona": { "strategy": "single", "max_tokens": 256 },
  "connection": { "timeout_secs": 15, "title": "Moon AI" }
}"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.json", json);

    let config = load_from_json(&path).unwrap();
    assert!(config.is_offline());
    assert_eq!(config.persona.strategy, PromptStrategy::Single);
    assert_eq!(config.persona.max_tokens, 256);
    assert_eq!(config.connection.timeout_secs, 15);
    assert_eq!(config.connection.title.as_deref(), Some("Moon AI"));

    // Extension-based dispatch picks JSON as well
    let again = load_from_path(&path).unwrap();
    assert_eq!(again.persona.max_tokens, 256);
}

#[test]
fn test_unknown_field_is_a_parse_error() {
    let yaml = "model: gpt\nretries: 3\n";
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yml", yaml);

    match load_from_path(path) {
        Err(ConfigError::Parse { message, .. }) => assert!(message.contains("retries")),
        other => panic!("Expected Parse, got {:?}", other),
    }
}

#[test]
fn test_missing_interpolated_variable() {
    let yaml = "api_key: ${CHAT_RELAY_TEST_DEFINITELY_UNSET}\n";
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::UnsetVariable { var }) => {
            assert_eq!(var, "CHAT_RELAY_TEST_DEFINITELY_UNSET")
        }
        other => panic!("Expected UnsetVariable, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_from_yaml("/nonexistent/relay.yaml");
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let yaml = "endpoint: not-a-url\n";
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yaml", yaml);

    let err = load_from_yaml(path).unwrap_err();
    assert!(err.to_string().contains("endpoint"));
}

#[test]
fn test_environment_overrides_file() {
    let yaml = r#"
model: from-file
server:
  port: 3000
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yaml", yaml);

    let config = load_with(lookup_from(vec![
        (CONFIG_PATH_VAR, path.to_string_lossy().to_string()),
        (MODEL_VAR, "from-env".to_string()),
        (API_KEY_VAR, "sk-or-env".to_string()),
    ]))
    .unwrap();

    assert_eq!(config.model, "from-env");
    assert_eq!(config.server.port, 3000);
    assert!(!config.is_offline());
}

#[test]
fn test_invalid_port_variable() {
    let result = load_with(lookup_from(vec![(PORT_VAR, "99999".to_string())]));
    assert!(matches!(result, Err(ConfigError::BadVariable { .. })));
}

#[test]
fn test_environment_repairs_invalid_file_value() {
    let yaml = "server:\n  port: 0\n";
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yaml", yaml);

    // The file alone is rejected
    assert!(matches!(
        load_from_path(&path),
        Err(ConfigError::Invalid(_))
    ));
    // but reads fine before validation
    assert_eq!(read_from_path(&path).unwrap().server.port, 0);

    let config = load_with(lookup_from(vec![
        (CONFIG_PATH_VAR, path.to_string_lossy().to_string()),
        (PORT_VAR, "8080".to_string()),
    ]))
    .unwrap();
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_invalid_merged_config_still_rejected() {
    let yaml = "server:\n  port: 0\n";
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "relay.yaml", yaml);

    let result = load_with(lookup_from(vec![(
        CONFIG_PATH_VAR,
        path.to_string_lossy().to_string(),
    )]));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}
