//! Pattern rules for offline replies

use crate::config::FallbackConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Rule patterns in priority order: identity, name, wellbeing
static RULE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)\b(?:kisne banaya|kisne banaya hai|who made you)\b",
        r"(?i)\b(?:naam|tum kaun|naam kya)\b",
        r"(?i)\b(?:kaise ho|kaise)\b",
    ]
    .map(|pattern| Regex::new(pattern).expect("fallback rule pattern is a valid regex"))
});

/// Which canned reply a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// "who made you"
    Identity,
    /// "what is your name"
    Name,
    /// "how are you"
    Wellbeing,
}

/// A word-bounded, case-insensitive pattern with a fixed reply
#[derive(Debug, Clone)]
pub struct FallbackRule {
    pub kind: RuleKind,
    pattern: Regex,
    reply: String,
}

impl FallbackRule {
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }
}

/// Build the ordered rule list with replies taken from configuration
pub fn default_rules(config: &FallbackConfig) -> Vec<FallbackRule> {
    let [identity, name, wellbeing] = &*RULE_PATTERNS;
    vec![
        FallbackRule {
            kind: RuleKind::Identity,
            pattern: identity.clone(),
            reply: config.identity_reply.clone(),
        },
        FallbackRule {
            kind: RuleKind::Name,
            pattern: name.clone(),
            reply: config.name_reply.clone(),
        },
        FallbackRule {
            kind: RuleKind::Wellbeing,
            pattern: wellbeing.clone(),
            reply: config.wellbeing_reply.clone(),
        },
    ]
}
