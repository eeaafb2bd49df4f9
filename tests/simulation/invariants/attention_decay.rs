//! Attention strictly decays under neglect.

use crate::simulation::helpers::{seeded_model, SEED};

#[test]
fn fifty_neglected_ticks_strictly_decrease_attention() {
    let (mut model, ids) = seeded_model(SEED, 1);
    let pet_id = ids[0].clone();

    let mut previous = model.pet(&pet_id).unwrap().fep().attention();
    for tick in 1..=50 {
        let report = model.step();
        let attention = report.agents[0].attention;
        assert!(
            attention < previous,
            "attention failed to decrease at tick {tick}: {attention} >= {previous}"
        );
        previous = attention;
    }
}

#[test]
fn thriving_eventually_follows_attention_down() {
    let (mut model, ids) = seeded_model(SEED, 1);
    let pet_id = ids[0].clone();
    model.pet_mut(&pet_id).unwrap().fep_mut().set_attention(31.0);

    // Attention soon dips below the growth threshold and thriving decays.
    let mut last_thriving = model.pet(&pet_id).unwrap().fep().thriving();
    let mut decayed = false;
    for _ in 0..600 {
        let report = model.step();
        let thriving = report.agents[0].thriving;
        if thriving < last_thriving {
            decayed = true;
            break;
        }
        last_thriving = thriving;
    }
    assert!(decayed, "thriving never started decaying");
}
