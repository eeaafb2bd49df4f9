//! Care and neglect pull two identical lives apart.

use companion_dynamics::agent::PetBuilder;
use companion_dynamics::sim::{
    FoodKind, Message, MessageContent, SimulationBuilder, SimulationModel,
};
use companion_dynamics::types::{PetId, UserId};

fn run_life(cared_for: bool) -> (SimulationModel, PetId) {
    let mut model = SimulationBuilder::new(42).build();
    let pet_id = model
        .spawn_pet(
            PetBuilder::new()
                .name("Miso")
                .owner(UserId::new("user_1").unwrap()),
        )
        .unwrap();

    for tick in 1..=720u64 {
        if cared_for {
            let content = match tick % 20 {
                0 => Some(MessageContent::Feed {
                    amount: 1.0,
                    kind: FoodKind::Basic,
                }),
                7 => Some(MessageContent::Play {
                    intensity: 0.8,
                    duration: 1.0,
                }),
                13 => Some(MessageContent::Pet {
                    duration: 1.0,
                    location: companion_dynamics::sim::PettingSpot::Head,
                }),
                _ => None,
            };
            if let Some(content) = content {
                model.deliver(Message {
                    sender: "user_1".to_string(),
                    recipient: pet_id.clone(),
                    content,
                    timestamp_ms: 0,
                });
            }
        }
        model.step();
    }
    (model, pet_id)
}

#[test]
fn three_days_of_care_beat_three_days_of_silence() {
    let (cared_model, cared_id) = run_life(true);
    let (neglected_model, neglected_id) = run_life(false);

    let cared = cared_model.pet(&cared_id).unwrap();
    let neglected = neglected_model.pet(&neglected_id).unwrap();

    assert!(cared.fep().attention() > neglected.fep().attention());
    assert!(cared.fep().thriving() > neglected.fep().thriving());
    assert!(cared.needs().hunger < neglected.needs().hunger);
    assert!(cared.relationships().human("user_1") > 0.0);

    // Sustained neglect shows up in the personality drift rules.
    use companion_dynamics::enums::TraitName;
    assert!(
        neglected.traits().get(TraitName::Neuroticism)
            >= cared.traits().get(TraitName::Neuroticism) - 0.05
    );
}
