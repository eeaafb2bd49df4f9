//! Two pets sharing a world for a simulated week.

use companion_dynamics::agent::PetBuilder;
use companion_dynamics::sim::SimulationBuilder;
use companion_dynamics::types::UserId;

#[test]
fn a_week_together_builds_familiarity() {
    let mut model = SimulationBuilder::new(42).build();
    let a = model
        .spawn_pet(
            PetBuilder::new()
                .name("Miso")
                .owner(UserId::new("user_a").unwrap()),
        )
        .unwrap();
    let b = model
        .spawn_pet(
            PetBuilder::new()
                .name("Mochi")
                .owner(UserId::new("user_b").unwrap()),
        )
        .unwrap();

    // One simulated week.
    for _ in 0..(7 * 240) {
        let report = model.step();
        assert!(report.quarantined.is_empty());
    }

    // Both pets aged into childhood.
    assert!(model.pet(&a).unwrap().age_days() > 6.9);
    assert_eq!(
        model.pet(&a).unwrap().life_stage(),
        companion_dynamics::enums::LifeStage::Adolescent
    );

    // Co-located pets met at least once and formed some relationship.
    let a_to_b = model.pet(&a).unwrap().relationships().pet(&b);
    let b_to_a = model.pet(&b).unwrap().relationships().pet(&a);
    assert!(
        a_to_b.abs() > 0.0 || b_to_a.abs() > 0.0,
        "no encounter registered in a whole week"
    );

    // Cognitive development accumulated through daily life.
    let mean = model.pet(&a).unwrap().cognition().mean_level();
    assert!(mean > 0.15, "mean cognition stuck at {mean}");
}
