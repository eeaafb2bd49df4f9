//! A thriving, attended pet answers warmth with warmth.

use crate::simulation::helpers::{message_to, seeded_model};
use companion_dynamics::sim::MessageContent;

const POSITIVE_RESPONSES: [&str; 5] = ["❤️", "🥰", "✨", "🎉", "😄"];

#[test]
fn high_attention_pet_replies_positively_to_a_smile() {
    let mut positive_runs = 0;

    for seed in 0..100 {
        let (mut model, ids) = seeded_model(seed, 1);
        let pet_id = ids[0].clone();

        // Ten quiet ticks first.
        for _ in 0..10 {
            model.step();
        }
        {
            let pet = model.pet_mut(&pet_id).unwrap();
            pet.fep_mut().set_attention(90.0);
            pet.fep_mut().set_thriving(80.0);
        }

        model.deliver(message_to(
            &pet_id,
            MessageContent::Emoji {
                sequence: "😊".to_string(),
            },
        ));
        let report = model.step();

        let response = report.agents[0]
            .emoji_responses
            .first()
            .cloned()
            .unwrap_or_default();
        if POSITIVE_RESPONSES.iter().any(|p| response.contains(p)) {
            positive_runs += 1;
        }
    }

    assert!(
        positive_runs >= 90,
        "only {positive_runs}/100 runs produced a positive response"
    );
}
