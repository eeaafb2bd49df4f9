//! Projection lifecycle between exchange systems and the environment.

use companion_dynamics::boundary::{BoundarySystem, ExchangeSystem, ProjectionStatus};
use companion_dynamics::enums::ProjectionKind;
use companion_dynamics::environment::Environment;
use companion_dynamics::types::{PetId, RegionId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

#[test]
fn projection_visible_to_other_pets_from_next_tick() {
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let author = PetId::new("pet_a").unwrap();
    let reader = PetId::new("pet_b").unwrap();
    let mut exchange = ExchangeSystem::new(author.clone());
    let boundary = BoundarySystem::new();

    let central = RegionId::new("central").unwrap();
    exchange
        .project_to_environment(
            ProjectionKind::SocialSignal,
            BTreeMap::new(),
            BTreeMap::new(),
            central.clone(),
            &boundary,
            &mut env,
            0,
        )
        .unwrap();

    let view = env.get_pet_view(&reader, 0.9, &mut rng);
    assert!(view.regions[&central].projections.is_empty());

    env.step(&mut rng);
    let view = env.get_pet_view(&reader, 0.9, &mut rng);
    let projections = &view.regions[&central].projections;
    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].source_pet, author);
}

#[test]
fn author_presence_slows_projection_decay() {
    // No central feature matches the territorial_marker kind string, so
    // both markers share the base decay; presence is what differentiates.
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let present = PetId::new("pet_present").unwrap();
    let absent = PetId::new("pet_absent").unwrap();
    let central = RegionId::new("central").unwrap();
    env.update_pet_location(&present, &central).unwrap();

    let boundary = BoundarySystem::new();
    let mut exchange_present = ExchangeSystem::new(present.clone());
    let mut exchange_absent = ExchangeSystem::new(absent.clone());

    let id_present = exchange_present
        .project_to_environment(
            ProjectionKind::TerritorialMarker,
            BTreeMap::new(),
            BTreeMap::new(),
            central.clone(),
            &boundary,
            &mut env,
            0,
        )
        .unwrap();
    let id_absent = exchange_absent
        .project_to_environment(
            ProjectionKind::TerritorialMarker,
            BTreeMap::new(),
            BTreeMap::new(),
            central,
            &boundary,
            &mut env,
            0,
        )
        .unwrap();
    env.step(&mut rng);

    let statuses_present = exchange_present.maintain_projections(&mut env);
    let statuses_absent = exchange_absent.maintain_projections(&mut env);

    let stability_of = |statuses: &BTreeMap<_, ProjectionStatus>, id| match statuses[id] {
        ProjectionStatus::Maintained { stability } => stability,
        other => panic!("unexpected status {other:?}"),
    };

    // The present author's marker holds (presence +0.05 offsets the decay,
    // minus the rival-pet penalty for the other author's absence case).
    assert!(
        stability_of(&statuses_present, &id_present)
            > stability_of(&statuses_absent, &id_absent)
    );
}
