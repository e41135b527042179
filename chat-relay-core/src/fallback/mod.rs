//! Offline fallback engine
//!
//! Produces a reply without the remote model: ordered pattern rules first,
//! then a uniform pick from a pool of generic replies. The random source is
//! injectable so the pick can be made deterministic in tests.

pub mod rules;

pub use rules::{default_rules, FallbackRule, RuleKind};

use crate::config::FallbackConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Where the generic reply pick gets its randomness
#[derive(Debug, Default)]
pub enum RandomSource {
    /// Thread-local OS-seeded generator
    #[default]
    Entropy,
    /// Fixed-seed generator shared behind a lock
    Seeded(Mutex<StdRng>),
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    /// Pick one element uniformly
    pub fn pick<'a, T>(&self, pool: &'a [T]) -> Option<&'a T> {
        match self {
            Self::Entropy => pool.choose(&mut rand::thread_rng()),
            Self::Seeded(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                pool.choose(&mut *rng)
            }
        }
    }
}

/// Rule-based reply generator used when the remote model is unavailable
#[derive(Debug)]
pub struct OfflineFallback {
    rules: Vec<FallbackRule>,
    generic_replies: Vec<String>,
    random: RandomSource,
}

impl Default for OfflineFallback {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

impl OfflineFallback {
    pub fn from_config(config: &FallbackConfig) -> Self {
        Self {
            rules: default_rules(config),
            generic_replies: config.generic_replies.clone(),
            random: RandomSource::default(),
        }
    }

    /// Replace the random source
    pub fn with_random_source(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    pub fn generic_replies(&self) -> &[String] {
        &self.generic_replies
    }

    /// First rule matching the message, if any
    pub fn matching_rule(&self, message: &str) -> Option<&FallbackRule> {
        let normalized = message.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    /// Produce a reply using the configured random source
    pub fn reply(&self, message: &str) -> String {
        if let Some(rule) = self.matching_rule(message) {
            return rule.reply().to_string();
        }
        self.random
            .pick(&self.generic_replies)
            .cloned()
            .unwrap_or_default()
    }

    /// Produce a reply drawing randomness from `rng`
    pub fn reply_with<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> String {
        if let Some(rule) = self.matching_rule(message) {
            return rule.reply().to_string();
        }
        self.generic_replies
            .choose(rng)
            .cloned()
            .unwrap_or_default()
    }
}
