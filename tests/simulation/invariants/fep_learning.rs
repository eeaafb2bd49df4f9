//! Surprise falls under a stationary observation stream.

use companion_dynamics::fep::{FepCore, BELIEF_DIM};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn mean_surprise_decreases_under_stationary_observations() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut core = FepCore::new(12, &mut rng);

    let stimulus: Vec<f32> = (0..BELIEF_DIM).map(|i| (i % 3) as f32 * 0.4).collect();
    let surprises: Vec<f32> = (0..100).map(|_| core.observe(&stimulus).surprise).collect();

    let early: f32 = surprises[..25].iter().sum::<f32>() / 25.0;
    let late: f32 = surprises[75..].iter().sum::<f32>() / 25.0;
    assert!(
        late < early,
        "mean surprise rose from {early} to {late} under a stationary stream"
    );
}

#[test]
fn accuracy_climbs_as_the_world_becomes_predictable() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut core = FepCore::new(12, &mut rng);
    let stimulus = vec![0.7; BELIEF_DIM];

    let before = core.accuracy();
    for _ in 0..100 {
        core.observe(&stimulus);
    }
    assert!(core.accuracy() > before);
}
