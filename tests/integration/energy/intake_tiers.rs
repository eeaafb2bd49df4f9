//! Intake depends on what the boundary lets the pet sense.

use companion_dynamics::energy::EnergySystem;
use companion_dynamics::environment::Environment;
use companion_dynamics::types::PetId;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn open_boundary_feeds_on_global_resources() {
    let pet = PetId::new("pet_1").unwrap();
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);

    let mut tight = EnergySystem::new(pet.clone(), 10.0);
    let mut open = EnergySystem::new(pet.clone(), 10.0);
    open.boundary_mut().adjust_permeability(0.5, 0.1);

    let tight_view = env.get_pet_view(&pet, tight.boundary().permeability(), &mut rng);
    let open_view = env.get_pet_view(&pet, open.boundary().permeability(), &mut rng);

    let tight_report = tight.step(&tight_view, &mut env, 0, &mut rng);
    let open_report = open.step(&open_view, &mut env, 0, &mut rng);

    // The full view exposes the global food pool; the mid view does not.
    assert!(open_report.intake > tight_report.intake * 2.0);
}

#[test]
fn nearly_closed_boundary_still_collects_some_ambient() {
    let pet = PetId::new("pet_1").unwrap();
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);

    let mut system = EnergySystem::new(pet.clone(), 10.0);
    system.boundary_mut().adjust_permeability(-1.0, 0.1);

    let view = env.get_pet_view(&pet, system.boundary().permeability(), &mut rng);
    let report = system.step(&view, &mut env, 0, &mut rng);
    assert!(report.intake > 0.0);
}
