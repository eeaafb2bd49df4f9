//! Advisory re-weighting of the response scorer.

use companion_dynamics::agent::{PetBuilder, StepContext};
use companion_dynamics::environment::Environment;
use companion_dynamics::fep::EmojiTable;
use companion_dynamics::sim::{
    Advice, Message, MessageContent, PromptContext, SemanticAdvisor,
};
use companion_dynamics::types::{Timestamp, UserId};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct PrayAdvisor;

impl SemanticAdvisor for PrayAdvisor {
    fn advise(&self, _context: &PromptContext) -> Option<Advice> {
        Some(Advice {
            preferred_response_emojis: vec!["🙏".to_string()],
            confidence: 1.0,
            reasoning: Some("always grateful".to_string()),
        })
    }
}

struct SilentAdvisor;

impl SemanticAdvisor for SilentAdvisor {
    fn advise(&self, _context: &PromptContext) -> Option<Advice> {
        None
    }
}

fn run_exchange(advisor: Option<&dyn SemanticAdvisor>, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut env = Environment::new();
    let table = EmojiTable::standard();
    let start = Timestamp::from_ymd_hms(2024, 1, 1, 8, 0, 0);
    let mut pet = PetBuilder::new()
        .owner(UserId::new("user_1").unwrap())
        .build(start, &mut rng)
        .unwrap();

    let inbox = vec![Message {
        sender: "user_1".to_string(),
        recipient: pet.id().clone(),
        content: MessageContent::Emoji {
            sequence: "🤔".to_string(),
        },
        timestamp_ms: 0,
    }];
    let ctx = StepContext {
        tick: 1,
        now: start.plus_ticks(1),
        emoji_table: &table,
        advisor,
    };
    let report = pet.step(&mut env, inbox, &ctx, &mut rng).unwrap();
    report.emoji_responses.into_iter().next().unwrap_or_default()
}

#[test]
fn confident_advice_shifts_responses_toward_preference() {
    let mut advised_hits = 0;
    for seed in 0..60 {
        if run_exchange(Some(&PrayAdvisor), seed).contains("🙏") {
            advised_hits += 1;
        }
    }

    let mut baseline_hits = 0;
    for seed in 0..60 {
        if run_exchange(None, seed).contains("🙏") {
            baseline_hits += 1;
        }
    }

    assert!(
        advised_hits > baseline_hits,
        "advice had no effect: {advised_hits} vs {baseline_hits}"
    );
}

#[test]
fn silent_advisor_is_equivalent_to_none() {
    for seed in [1, 7, 42] {
        assert_eq!(
            run_exchange(Some(&SilentAdvisor), seed),
            run_exchange(None, seed)
        );
    }
}
