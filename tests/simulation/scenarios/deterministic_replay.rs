//! Byte-for-byte replay under an identical seed and schedule.

use crate::simulation::helpers::{message_to, seeded_model, SEED};
use companion_dynamics::sim::{FoodKind, MessageContent, TickReport};

fn scripted_run(seed: u64) -> Vec<TickReport> {
    let (mut model, ids) = seeded_model(seed, 3);
    let mut reports = Vec::new();

    for tick in 1..=50u64 {
        // A fixed interaction schedule.
        if tick % 5 == 0 {
            model.deliver(message_to(
                &ids[0],
                MessageContent::Feed {
                    amount: 1.0,
                    kind: FoodKind::Basic,
                },
            ));
        }
        if tick % 7 == 0 {
            model.deliver(message_to(
                &ids[1],
                MessageContent::Emoji {
                    sequence: "😊❤️".to_string(),
                },
            ));
        }
        if tick % 11 == 0 {
            model.deliver(message_to(
                &ids[2],
                MessageContent::Play {
                    intensity: 0.8,
                    duration: 1.0,
                },
            ));
        }
        reports.push(model.step());
    }
    reports
}

#[test]
fn identical_seeds_replay_byte_for_byte() {
    let first = scripted_run(SEED);
    let second = scripted_run(SEED);

    let first_bytes = serde_json::to_vec(&first).unwrap();
    let second_bytes = serde_json::to_vec(&second).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn different_seeds_diverge() {
    let first = serde_json::to_vec(&scripted_run(SEED)).unwrap();
    let other = serde_json::to_vec(&scripted_run(SEED + 1)).unwrap();
    assert_ne!(first, other);
}
