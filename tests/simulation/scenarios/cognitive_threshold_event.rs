//! A pet on the cusp of a cognitive milestone crosses it exactly once.

use crate::simulation::helpers::{message_to, seeded_model, SEED};
use companion_dynamics::enums::CognitiveArea;
use companion_dynamics::sim::MessageContent;

#[test]
fn pattern_recognition_crosses_its_first_threshold_once() {
    let (mut model, ids) = seeded_model(SEED, 1);
    let pet_id = ids[0].clone();

    model
        .pet_mut(&pet_id)
        .unwrap()
        .cognition_mut()
        .set_area(CognitiveArea::PatternRecognition, 0.19);

    let mut crossings = Vec::new();
    for _ in 0..5 {
        model.deliver(message_to(
            &pet_id,
            MessageContent::Play {
                intensity: 1.0,
                duration: 1.0,
            },
        ));
        let report = model.step();
        for event in &report.agents[0].cognitive.recent_developments {
            if event.area == CognitiveArea::PatternRecognition
                && !crossings.contains(&(event.tick, event.threshold.to_bits()))
            {
                crossings.push((event.tick, event.threshold.to_bits()));
            }
        }
    }

    assert_eq!(
        crossings.len(),
        1,
        "expected exactly one pattern-recognition crossing, saw {crossings:?}"
    );
    assert_eq!(f32::from_bits(crossings[0].1), 0.2);

    let value = model
        .pet(&pet_id)
        .unwrap()
        .cognition()
        .area(CognitiveArea::PatternRecognition);
    assert!(
        (0.2..0.4).contains(&value),
        "pattern recognition landed at {value}"
    );
}
