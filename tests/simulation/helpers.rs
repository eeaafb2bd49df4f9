//! Shared fixtures for simulation tests.

use companion_dynamics::agent::PetBuilder;
use companion_dynamics::sim::{Message, MessageContent, SimulationBuilder, SimulationModel};
use companion_dynamics::types::{PetId, UserId};

/// The canonical test seed.
pub const SEED: u64 = 42;

/// Builds a model with `count` owned pets.
pub fn seeded_model(seed: u64, count: usize) -> (SimulationModel, Vec<PetId>) {
    let mut model = SimulationBuilder::new(seed).build();
    let ids = (0..count)
        .map(|i| {
            model
                .spawn_pet(
                    PetBuilder::new()
                        .name(format!("pet-{i}"))
                        .owner(UserId::new(format!("user_{i}")).unwrap()),
                )
                .expect("valid builder")
        })
        .collect();
    (model, ids)
}

/// Wraps content into a message from `user_0`.
pub fn message_to(pet: &PetId, content: MessageContent) -> Message {
    Message {
        sender: "user_0".to_string(),
        recipient: pet.clone(),
        content,
        timestamp_ms: 0,
    }
}
