//! Feeding a hungry pet: hunger falls, mood lifts, the bond deepens.

use crate::simulation::helpers::{message_to, seeded_model, SEED};
use companion_dynamics::sim::{FoodKind, MessageContent};

#[test]
fn basic_meal_restores_a_hungry_pet() {
    let (mut model, ids) = seeded_model(SEED, 1);
    let pet_id = ids[0].clone();

    {
        let pet = model.pet_mut(&pet_id).unwrap();
        pet.needs_mut().hunger = 80.0;
        pet.vitals_mut().mood = 40.0;
    }

    model.deliver(message_to(
        &pet_id,
        MessageContent::Feed {
            amount: 2.0,
            kind: FoodKind::Basic,
        },
    ));
    model.step();

    let pet = model.pet(&pet_id).unwrap();
    assert!(
        pet.needs().hunger <= 41.0,
        "hunger still {}",
        pet.needs().hunger
    );
    assert!(pet.vitals().mood >= 44.0, "mood only {}", pet.vitals().mood);

    let bond = pet.relationships().human("user_0");
    assert!(
        (0.3..=0.7).contains(&bond),
        "bond moved by {bond}, expected about 0.5"
    );
}

#[test]
fn premium_food_outperforms_treats() {
    let (mut model, ids) = seeded_model(SEED, 2);

    for (pet_id, kind) in ids.iter().zip([FoodKind::Premium, FoodKind::Treat]) {
        let pet = model.pet_mut(pet_id).unwrap();
        pet.needs_mut().hunger = 80.0;
        model.deliver(message_to(pet_id, MessageContent::Feed { amount: 1.0, kind }));
    }
    model.step();

    let premium_hunger = model.pet(&ids[0]).unwrap().needs().hunger;
    let treat_hunger = model.pet(&ids[1]).unwrap().needs().hunger;
    assert!(premium_hunger < treat_hunger);
}
