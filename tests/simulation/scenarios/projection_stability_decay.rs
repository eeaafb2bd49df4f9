//! An abandoned territorial marker fades on schedule.

use companion_dynamics::boundary::{BoundarySystem, ExchangeSystem, ProjectionStatus};
use companion_dynamics::enums::ProjectionKind;
use companion_dynamics::environment::Environment;
use companion_dynamics::types::{PetId, RegionId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

#[test]
fn abandoned_marker_is_gone_after_ten_maintenance_passes() {
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let author = PetId::new("pet_a").unwrap();
    let central = RegionId::new("central").unwrap();

    // The author projects into central, then leaves for the quiet corner.
    env.update_pet_location(&author, &central).unwrap();
    let mut exchange = ExchangeSystem::new(author.clone());
    let boundary = BoundarySystem::new();
    let marker = exchange
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
    env.update_pet_location(&author, &RegionId::new("quiet").unwrap())
        .unwrap();
    env.step(&mut rng);

    // Nine passes of pure -0.05 decay from 0.5.
    for pass in 1..=9 {
        let statuses = exchange.maintain_projections(&mut env);
        match statuses[&marker] {
            ProjectionStatus::Maintained { stability } => {
                let expected = 0.5 - 0.05 * pass as f32;
                assert!(
                    (stability - expected).abs() < 1e-5,
                    "pass {pass}: stability {stability}, expected {expected}"
                );
            }
            other => panic!("unexpected status {other:?} on pass {pass}"),
        }
    }

    // The tenth pass reaches zero and the marker dissipates.
    let statuses = exchange.maintain_projections(&mut env);
    assert_eq!(statuses[&marker], ProjectionStatus::Dissipated);
    assert!(env.projection(&marker).is_none());

    // And it no longer appears in anyone's view.
    let observer = PetId::new("pet_b").unwrap();
    let view = env.get_pet_view(&observer, 0.9, &mut rng);
    for region in view.regions.values() {
        assert!(region.projections.is_empty());
    }
}
