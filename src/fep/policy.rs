//! Multi-step policy optimisation.
//!
//! Instead of one-step greedy selection, candidate action sequences are
//! rolled forward through the predictive model and scored by discounted
//! surprise reduction, attention and thriving bonuses, and preference
//! alignment. The first action of the best sequence wins.

use crate::fep::core::{ActionChoice, FepCore};
use rand::Rng;

/// Number of candidate sequences evaluated per decision.
const MAX_SEQUENCES: usize = 20;
/// Per-step reward discount.
const DISCOUNT: f32 = 0.9;
/// Expected-surprise level that draws a penalty.
const SURPRISE_PENALTY_THRESHOLD: f32 = 2.0;

/// Optimises over action sequences of length `horizon`.
pub(crate) fn optimize_policy(
    core: &FepCore,
    state: &[f32],
    horizon: usize,
    rng: &mut impl Rng,
) -> ActionChoice {
    let horizon = horizon.max(1);
    let action_size = core.action_preferences().len();

    // Exploration short-circuit.
    if rng.gen::<f32>() < core.exploration_rate() {
        return ActionChoice {
            action: rng.gen_range(0..action_size),
            confidence: 0.6,
        };
    }

    let sequences = generate_sequences(core, horizon, rng);

    let mut best_score = f32::NEG_INFINITY;
    let mut best_action = 0;
    for sequence in &sequences {
        let score = evaluate_sequence(core, state, sequence, rng);
        if score > best_score {
            best_score = score;
            best_action = sequence[0];
        }
    }

    ActionChoice {
        action: best_action,
        confidence: (best_score / 8.0).clamp(0.0, 0.95),
    }
}

/// Generates candidate sequences via three strategies plus random fill.
fn generate_sequences(core: &FepCore, horizon: usize, rng: &mut impl Rng) -> Vec<Vec<usize>> {
    let per_strategy = MAX_SEQUENCES / 3;
    let mut sequences = Vec::with_capacity(MAX_SEQUENCES);

    // Greedy-by-preference.
    for _ in 0..per_strategy {
        sequences.push((0..horizon).map(|_| sample_by_preference(core, rng)).collect());
    }
    // Exploratory mix: 60% random.
    for _ in 0..per_strategy {
        sequences.push(mixed_sequence(core, horizon, 0.6, rng));
    }
    // Balanced mix: 40% random.
    for _ in 0..per_strategy {
        sequences.push(mixed_sequence(core, horizon, 0.4, rng));
    }
    // Random fill to the cap.
    let action_size = core.action_preferences().len();
    while sequences.len() < MAX_SEQUENCES {
        sequences.push((0..horizon).map(|_| rng.gen_range(0..action_size)).collect());
    }

    sequences
}

fn mixed_sequence(
    core: &FepCore,
    horizon: usize,
    random_share: f32,
    rng: &mut impl Rng,
) -> Vec<usize> {
    let action_size = core.action_preferences().len();
    (0..horizon)
        .map(|_| {
            if rng.gen::<f32>() < random_share {
                rng.gen_range(0..action_size)
            } else {
                sample_by_preference(core, rng)
            }
        })
        .collect()
}

/// Samples an action proportionally to its preference weight.
fn sample_by_preference(core: &FepCore, rng: &mut impl Rng) -> usize {
    let prefs = core.action_preferences();
    let total: f32 = prefs.iter().sum();
    if total <= 0.0 {
        return rng.gen_range(0..prefs.len());
    }
    let roll = rng.gen::<f32>() * total;
    let mut cumulative = 0.0;
    for (i, p) in prefs.iter().enumerate() {
        cumulative += p;
        if roll <= cumulative {
            return i;
        }
    }
    prefs.len() - 1
}

/// Rolls a sequence forward, accumulating discounted reward.
fn evaluate_sequence(
    core: &FepCore,
    state: &[f32],
    sequence: &[usize],
    rng: &mut impl Rng,
) -> f32 {
    let mut current: Vec<f32> = state.to_vec();
    let mut total = 0.0;

    for (step, &action) in sequence.iter().enumerate() {
        let mut next = core.predict_state(&current, action);
        // Prediction noise: the future is uncertain.
        for value in &mut next {
            *value = (*value + noise(rng, 0.05)).clamp(0.0, 1.0);
        }

        let reward = immediate_reward(core, &current, action, &next);
        total += reward * DISCOUNT.powi(step as i32);
        current = next;
    }

    total
}

fn immediate_reward(core: &FepCore, current: &[f32], action: usize, next: &[f32]) -> f32 {
    let mut reward = 0.0;

    let current_surprise = core.expected_surprise(current);
    let next_surprise = core.expected_surprise(next);
    reward += 2.0 * (current_surprise - next_surprise);

    // Attention-seeking actions pay when attention runs low.
    if core.attention() < 50.0 && action < 3 {
        reward += 1.0;
    }
    // Thriving-maintaining actions pay while thriving is high.
    if core.thriving() > 70.0 && (3..6).contains(&action) {
        reward += 0.5;
    }

    if let Some(pref) = core.action_preferences().get(action) {
        reward += pref * 0.3;
    }

    if next_surprise > SURPRISE_PENALTY_THRESHOLD {
        reward -= 1.0;
    }

    reward
}

/// Cheap zero-mean noise with roughly the given standard deviation.
fn noise(rng: &mut impl Rng, sigma: f32) -> f32 {
    let sum: f32 = (0..3).map(|_| rng.gen::<f32>()).sum();
    (sum - 1.5) * 2.0 * sigma
}
