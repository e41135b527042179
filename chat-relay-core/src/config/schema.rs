//! Configuration schema structures with serde support

use super::secrets::{SafeLogging, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default completion endpoint (OpenRouter's OpenAI-compatible API)
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gpt-3.5-mini";

/// Size of the generic offline reply pool
pub const GENERIC_REPLY_COUNT: usize = 3;

/// Root configuration structure for the relay
///
/// Loaded once at startup and shared read-only between requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Completion credential; empty means offline-only mode
    #[serde(default)]
    pub api_key: SecretString,

    /// Model identifier sent with every completion payload
    #[serde(default = "default_model")]
    pub model: String,

    /// Full URL of the completion endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Inbound HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Persona and prompt construction
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Outbound connection settings
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Canned replies for offline mode
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::default(),
            model: default_model(),
            endpoint: default_endpoint(),
            server: ServerConfig::default(),
            persona: PersonaConfig::default(),
            connection: ConnectionConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Whether the remote completion API should be skipped entirely
    pub fn is_offline(&self) -> bool {
        self.api_key.is_empty()
    }
}

impl SafeLogging for RelayConfig {
    fn safe_for_logging(&self) -> String {
        format!(
            "model={} endpoint={} api_key={} strategy={:?} timeout={}s offline={}",
            self.model,
            self.endpoint,
            self.api_key.partial_redact(),
            self.persona.strategy,
            self.connection.timeout_secs,
            self.is_offline()
        )
    }
}

/// Inbound server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Text returned by the health endpoints; derived from the persona name when unset
    #[serde(default)]
    pub banner: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            banner: None,
        }
    }
}

/// How the user message is wrapped into the completion payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStrategy {
    /// One user-role message embedding the persona and the quoted user text
    Single,
    /// A system-role persona message followed by the raw user text
    #[default]
    SystemUser,
}

impl std::str::FromStr for PromptStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "system_user" | "system-user" => Ok(Self::SystemUser),
            other => Err(format!(
                "unknown prompt strategy '{}', expected 'single' or 'system_user'",
                other
            )),
        }
    }
}

/// Persona configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaConfig {
    /// Display name of the assistant
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Instruction text defining tone, identity and reply language
    #[serde(default = "default_persona_instruction")]
    pub instruction: String,

    /// Prompt construction strategy
    #[serde(default)]
    pub strategy: PromptStrategy,

    /// Upper bound on generated tokens; 0 leaves it to the provider
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            instruction: default_persona_instruction(),
            strategy: PromptStrategy::default(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl PersonaConfig {
    /// Persona text sent ahead of every message: the name, then the instruction
    pub fn preamble(&self) -> String {
        format!("You are {}. {}", self.name.trim(), self.instruction.trim())
    }
}

/// Outbound connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Total time allowed for one completion call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish the connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Optional `HTTP-Referer` attribution header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    /// Optional `X-Title` attribution header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            referer: None,
            title: None,
        }
    }
}

impl ConnectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Canned replies used when the remote model is unavailable
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Reply to "who made you" style questions
    #[serde(default = "default_identity_reply")]
    pub identity_reply: String,

    /// Reply to "what is your name" style questions
    #[serde(default = "default_name_reply")]
    pub name_reply: String,

    /// Reply to "how are you" style questions
    #[serde(default = "default_wellbeing_reply")]
    pub wellbeing_reply: String,

    /// Pool sampled uniformly when no rule matches; exactly
    /// [`GENERIC_REPLY_COUNT`] entries
    #[serde(default = "default_generic_replies")]
    pub generic_replies: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            identity_reply: default_identity_reply(),
            name_reply: default_name_reply(),
            wellbeing_reply: default_wellbeing_reply(),
            generic_replies: default_generic_replies(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_persona_name() -> String {
    "Moon AI".to_string()
}

fn default_persona_instruction() -> String {
    "Reply in Hindi, friendly and short.".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_identity_reply() -> String {
    "Mujhe Rohit ne banaya hai 💖".to_string()
}

fn default_name_reply() -> String {
    "Mera naam Moon 🌙 AI hai — tumhara digital dost!".to_string()
}

fn default_wellbeing_reply() -> String {
    "Main bilkul theek hoon 🌸 tum kaise ho?".to_string()
}

fn default_generic_replies() -> Vec<String> {
    vec![
        "Server thoda busy hai, thodi der baad try karo 😅".to_string(),
        "Hmm… batao aur kya chal raha hai?".to_string(),
        "Acha! ye to mazedar hai 😄 aur batao.".to_string(),
    ]
}
