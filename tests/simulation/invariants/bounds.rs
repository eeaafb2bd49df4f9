//! Universal bound invariants: for all ticks, for all agents.

use crate::simulation::helpers::{message_to, seeded_model, SEED};
use companion_dynamics::enums::TraitName;
use companion_dynamics::sim::{FoodKind, MessageContent};

#[test]
fn every_bound_holds_over_a_long_mixed_run() {
    let (mut model, ids) = seeded_model(SEED, 5);

    for tick in 1..=300u64 {
        // Mix in interactions to exercise every handler path.
        let target = &ids[(tick % ids.len() as u64) as usize];
        let content = match tick % 6 {
            0 => MessageContent::Feed {
                amount: 1.5,
                kind: FoodKind::Premium,
            },
            1 => MessageContent::Play {
                intensity: 1.0,
                duration: 1.0,
            },
            2 => MessageContent::Pet {
                duration: 1.0,
                location: companion_dynamics::sim::PettingSpot::Head,
            },
            3 => MessageContent::Train {
                skill: "sit".to_string(),
                difficulty: 1.0,
                duration: 1.0,
            },
            4 => MessageContent::Emoji {
                sequence: "😊🎮".to_string(),
            },
            _ => MessageContent::Check { duration: 0.5 },
        };
        model.deliver(message_to(target, content));

        let report = model.step();
        assert!(report.quarantined.is_empty(), "quarantine at tick {tick}");

        for agent in &report.agents {
            assert!((0.0..=100.0).contains(&agent.vitals.health));
            assert!((0.0..=100.0).contains(&agent.vitals.energy));
            assert!((0.0..=100.0).contains(&agent.vitals.mood));
            assert!(agent.needs.in_bounds());
            assert!((0.1..=1.0).contains(&agent.boundary.permeability));
            assert!((0.2..=2.0).contains(&agent.boundary.size));
            assert!((0.0..=100.0).contains(&agent.attention));
            assert!((0.0..=100.0).contains(&agent.thriving));
            assert!((0.0..=1.0).contains(&agent.surprise));
            for value in agent.cognitive.areas.values() {
                assert!((0.0..=1.0).contains(value));
            }
        }
    }

    // Per-pet state invariants after the run.
    for id in &ids {
        let pet = model.pet(id).unwrap();
        for name in TraitName::ALL {
            assert!((0.0..=1.0).contains(&pet.traits().get(name)));
        }
        assert!(pet.relationships().in_bounds());
        assert!(pet.memory().episodic().len() <= 100);
        assert!(pet.fep().surprise_history().len() <= 100);
        assert_eq!(pet.fep().beliefs().len(), companion_dynamics::fep::BELIEF_DIM);
        for (b, p) in pet.fep().beliefs().iter().zip(pet.fep().precision()) {
            assert!((0.0..=1.0).contains(b));
            assert!((0.1..=2.0).contains(p));
        }
        for element in pet.energy_system().boundary().assimilated().values() {
            assert!((0.0..=1.0).contains(&element.integration));
        }
    }
}

#[test]
fn message_bursts_queue_without_loss_of_bounds() {
    let (mut model, ids) = seeded_model(SEED, 1);
    let pet_id = ids[0].clone();

    for _ in 0..200 {
        model.deliver(message_to(
            &pet_id,
            MessageContent::Check { duration: 0.1 },
        ));
    }
    let report = model.step();
    let agent = &report.agents[0];
    assert!((0.0..=100.0).contains(&agent.attention));
    assert!(agent.vitals.in_bounds());
}
