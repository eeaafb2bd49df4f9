//! View tiers as seen by pets at different permeabilities.

use companion_dynamics::environment::Environment;
use companion_dynamics::types::{PetId, RegionId};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn tiers_are_additive() {
    let env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let pet = PetId::new("pet_1").unwrap();

    let low = env.get_pet_view(&pet, 0.2, &mut rng);
    let mid = env.get_pet_view(&pet, 0.5, &mut rng);
    let full = env.get_pet_view(&pet, 0.9, &mut rng);

    assert!(low.day_of_week.is_none() && low.social_atmosphere.is_none());
    assert!(mid.day_of_week.is_some() && mid.social_atmosphere.is_some());
    assert!(mid.emotional_tone.is_none());
    assert!(full.emotional_tone.is_some() && full.novelty_level.is_some());
    assert!(!full.resources.is_empty());
}

#[test]
fn mid_tier_glimpses_depend_on_the_roll() {
    let env = Environment::new();
    let pet = PetId::new("pet_1").unwrap();

    // Across many draws, foreign-region features appear sometimes but not
    // always at permeability 0.5.
    let mut seen_some = false;
    let mut seen_none = false;
    for seed in 0..40 {
        let mut rng = StdRng::seed_from_u64(seed);
        let view = env.get_pet_view(&pet, 0.5, &mut rng);
        let foreign = RegionId::new("play").unwrap();
        let count = view.regions[&foreign].features.len();
        if count > 0 {
            seen_some = true;
        }
        if count == 0 {
            seen_none = true;
        }
    }
    assert!(seen_some && seen_none);
}

#[test]
fn competing_pets_exclude_own_region() {
    let mut env = Environment::new();
    let mut rng = StdRng::seed_from_u64(42);
    let me = PetId::new("pet_1").unwrap();
    let roommate = PetId::new("pet_2").unwrap();
    let rival = PetId::new("pet_3").unwrap();

    let central = RegionId::new("central").unwrap();
    let play = RegionId::new("play").unwrap();
    env.update_pet_location(&me, &central).unwrap();
    env.update_pet_location(&roommate, &central).unwrap();
    env.update_pet_location(&rival, &play).unwrap();

    let view = env.get_pet_view(&me, 0.9, &mut rng);
    assert_eq!(view.competing_pets, vec![rival]);
}
