//! Boundary maintenance against real environment views.

use companion_dynamics::boundary::{environmental_pressure, BoundaryStatus, BoundarySystem};
use companion_dynamics::enums::Weather;
use companion_dynamics::environment::Environment;
use companion_dynamics::types::PetId;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn storm_views_pressure_the_boundary_harder() {
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let pet = PetId::new("pet_1").unwrap();

    env.set_weather(Weather::Clear);
    let calm = environmental_pressure(&env.get_pet_view(&pet, 0.5, &mut rng));
    env.set_weather(Weather::Stormy);
    let stormy = environmental_pressure(&env.get_pet_view(&pet, 0.5, &mut rng));

    assert!(stormy > calm + 0.25);
}

#[test]
fn sustained_starvation_drives_permeability_to_the_ceiling() {
    let env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let pet = PetId::new("pet_1").unwrap();
    let mut boundary = BoundarySystem::new();

    let view = env.get_pet_view(&pet, 0.5, &mut rng);
    for _ in 0..20 {
        let update = boundary.update(&view, 0.0);
        assert_eq!(update.status, BoundaryStatus::Failing);
    }
    assert!((boundary.permeability() - 1.0).abs() < f32::EPSILON);
    assert!((boundary.size() - 0.2).abs() < 0.31);
}

#[test]
fn funded_maintenance_consumes_at_most_the_bill() {
    let env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let pet = PetId::new("pet_1").unwrap();
    let mut boundary = BoundarySystem::new();

    let view = env.get_pet_view(&pet, 0.5, &mut rng);
    let update = boundary.update(&view, 50.0);
    assert_eq!(update.status, BoundaryStatus::Maintained);
    assert!(update.consumed <= 50.0);
    assert!(update.consumed > 0.0);
}
