//! Property tests for the offline path

use chat_relay_core::config::{FallbackConfig, RelayConfig};
use chat_relay_core::fallback::{OfflineFallback, RandomSource};
use chat_relay_core::receiver::{self, MAX_MESSAGE_CHARS};
use chat_relay_core::ChatRelay;
use proptest::prelude::*;
use serde_json::json;

fn known_replies(config: &FallbackConfig) -> Vec<String> {
    let mut replies = vec![
        config.identity_reply.clone(),
        config.name_reply.clone(),
        config.wellbeing_reply.clone(),
    ];
    replies.extend(config.generic_replies.iter().cloned());
    replies
}

proptest! {
    #[test]
    fn truncation_never_exceeds_cap(text in ".{0,3000}") {
        let capped = receiver::truncate_chars(&text, MAX_MESSAGE_CHARS);
        prop_assert!(capped.chars().count() <= MAX_MESSAGE_CHARS);
        prop_assert!(text.starts_with(capped));
    }

    #[test]
    fn offline_reply_is_always_known(message in "[a-zA-Z ?!]{1,200}") {
        prop_assume!(!message.trim().is_empty());

        let config = FallbackConfig::default();
        let engine = OfflineFallback::from_config(&config);
        let reply = engine.reply(&message);
        prop_assert!(known_replies(&config).contains(&reply));
    }

    #[test]
    fn who_made_you_is_deterministic(
        prefix in "[a-z ]{0,40}",
        suffix in "[a-z ]{0,40}",
        upper in any::<bool>(),
    ) {
        let phrase = if upper { "WHO MADE YOU" } else { "Who made you" };
        let message = format!("{} {} {}", prefix, phrase, suffix);

        let config = FallbackConfig::default();
        let engine = OfflineFallback::from_config(&config);
        prop_assert_eq!(engine.reply(&message), config.identity_reply);
    }

    #[test]
    fn seeded_pick_is_reproducible(seed in any::<u64>()) {
        let a = OfflineFallback::default().with_random_source(RandomSource::seeded(seed));
        let b = OfflineFallback::default().with_random_source(RandomSource::seeded(seed));
        let reply = a.reply("zzz");
        prop_assert_eq!(&reply, &b.reply("zzz"));
        prop_assert!(a.generic_replies().contains(&reply));
    }
}

/// Offline relay answers every non-empty message from the known set
#[tokio::test]
async fn offline_relay_replies_from_known_set() {
    let config = RelayConfig::default();
    assert!(config.is_offline());

    let relay = ChatRelay::from_config(&config).unwrap();
    let known = known_replies(&config.fallback);

    for message in ["hello", "kaise ho?", "tumhara naam", "who made you", "🌙"] {
        let reply = relay
            .handle_json(&json!({ "message": message }))
            .await
            .unwrap();
        assert!(known.contains(&reply.reply), "unexpected reply {:?}", reply.reply);
    }
}
