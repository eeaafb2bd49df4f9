//! Priority-ordered allocation under the live environment.

use companion_dynamics::energy::{EnergySystem, MAX_ENERGY};
use companion_dynamics::environment::Environment;
use companion_dynamics::types::PetId;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn setup(initial_energy: f32) -> (EnergySystem, Environment, StdRng) {
    (
        EnergySystem::new(PetId::new("pet_1").unwrap(), initial_energy),
        Environment::new(),
        StdRng::seed_from_u64(42),
    )
}

#[test]
fn allocations_never_exceed_the_pool() {
    for initial in [5.0, 25.0, 45.0, 65.0, 85.0, 100.0] {
        let (mut system, mut env, mut rng) = setup(initial);
        let view = env.get_pet_view(&PetId::new("pet_1").unwrap(), 0.5, &mut rng);
        let report = system.step(&view, &mut env, 0, &mut rng);
        let a = report.allocations;
        let total = a.boundary + a.critical + a.growth + a.social + a.exploration + a.reproduction;
        assert!(
            total <= initial + report.intake + 1e-3,
            "allocated {total} from {initial}"
        );
    }
}

#[test]
fn priority_ladder_unlocks_with_charge() {
    let thresholds = [
        (25.0, false, false, false),
        (35.0, false, true, false),
        (45.0, false, true, true),
        (55.0, true, true, true),
    ];
    for (initial, growth, social, exploration) in thresholds {
        let (mut system, mut env, mut rng) = setup(initial);
        let view = env.get_pet_view(&PetId::new("pet_1").unwrap(), 0.2, &mut rng);
        let report = system.step(&view, &mut env, 0, &mut rng);
        let a = report.allocations;
        assert_eq!(a.growth > 0.0, growth, "growth at {initial}");
        assert_eq!(a.social > 0.0, social, "social at {initial}");
        assert_eq!(a.exploration > 0.0, exploration, "exploration at {initial}");
    }
}

#[test]
fn energy_delta_bounded_by_intake() {
    let (mut system, mut env, mut rng) = setup(50.0);
    for tick in 0..100 {
        env.step(&mut rng);
        let view = env.get_pet_view(&PetId::new("pet_1").unwrap(), 0.5, &mut rng);
        let report = system.step(&view, &mut env, tick, &mut rng);
        let delta = report.ending_energy - report.starting_energy;
        assert!(delta <= report.intake + 1e-4);
        assert!(report.ending_energy >= 0.0);
        assert!(report.ending_energy <= MAX_ENERGY);
    }
}
