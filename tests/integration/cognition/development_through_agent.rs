//! Cognitive development driven by the agent pipeline.

use companion_dynamics::agent::{PetBuilder, StepContext};
use companion_dynamics::enums::CognitiveArea;
use companion_dynamics::environment::Environment;
use companion_dynamics::fep::EmojiTable;
use companion_dynamics::types::{Timestamp, UserId};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn living_alone_still_grows_environmental_awareness() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut env = Environment::new();
    let table = EmojiTable::standard();
    let start = Timestamp::from_ymd_hms(2024, 1, 1, 8, 0, 0);
    let mut pet = PetBuilder::new()
        .owner(UserId::new("user_1").unwrap())
        .build(start, &mut rng)
        .unwrap();

    let before = pet.cognition().area(CognitiveArea::PatternRecognition);
    for tick in 1..=100 {
        env.step(&mut rng);
        let ctx = StepContext {
            tick,
            now: start.plus_ticks(tick),
            emoji_table: &table,
            advisor: None,
        };
        pet.step(&mut env, Vec::new(), &ctx, &mut rng).unwrap();
    }

    // Passive observation feeds pattern recognition every tick.
    assert!(pet.cognition().area(CognitiveArea::PatternRecognition) > before);
}

#[test]
fn areas_are_monotone_across_agent_ticks() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut env = Environment::new();
    let table = EmojiTable::standard();
    let start = Timestamp::from_ymd_hms(2024, 1, 1, 8, 0, 0);
    let mut pet = PetBuilder::new()
        .owner(UserId::new("user_1").unwrap())
        .build(start, &mut rng)
        .unwrap();

    let mut previous: Vec<f32> = CognitiveArea::ALL
        .iter()
        .map(|a| pet.cognition().area(*a))
        .collect();

    for tick in 1..=200 {
        env.step(&mut rng);
        let ctx = StepContext {
            tick,
            now: start.plus_ticks(tick),
            emoji_table: &table,
            advisor: None,
        };
        pet.step(&mut env, Vec::new(), &ctx, &mut rng).unwrap();

        let current: Vec<f32> = CognitiveArea::ALL
            .iter()
            .map(|a| pet.cognition().area(*a))
            .collect();
        for (c, p) in current.iter().zip(&previous) {
            assert!(c >= p, "a cognitive area regressed at tick {tick}");
        }
        previous = current;
    }
}
