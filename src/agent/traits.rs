//! Personality traits and the coupling graph between them.
//!
//! Trait values live in `[0, 1]` and evolve slowly: interaction patterns
//! push individual traits, couplings pull connected traits toward each
//! other, and a rare mutation keeps populations from converging.

use crate::enums::TraitName;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed couplings every pet starts with.
const SEED_CONNECTIONS: [(TraitName, TraitName, f32); 4] = [
    (TraitName::Extraversion, TraitName::Playfulness, 0.6),
    (TraitName::Agreeableness, TraitName::Affection, 0.8),
    (TraitName::Neuroticism, TraitName::Stubbornness, 0.5),
    (TraitName::Openness, TraitName::Curiosity, 0.7),
];

/// A pet's trait values plus the directed coupling graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    values: BTreeMap<TraitName, f32>,
    /// Directed couplings `(source, target) -> strength`.
    connections: BTreeMap<(TraitName, TraitName), f32>,
}

impl TraitProfile {
    /// Samples a fresh profile: values uniform in `[0.3, 0.7]`, fixed seed
    /// couplings plus five random ones.
    #[must_use]
    pub fn generate(rng: &mut impl Rng) -> Self {
        let values = TraitName::ALL
            .iter()
            .map(|t| (*t, 0.3 + 0.4 * rng.gen::<f32>()))
            .collect();

        let mut connections: BTreeMap<(TraitName, TraitName), f32> = SEED_CONNECTIONS
            .iter()
            .map(|(a, b, w)| ((*a, *b), *w))
            .collect();

        for _ in 0..5 {
            let a = TraitName::ALL[rng.gen_range(0..TraitName::ALL.len())];
            let b = TraitName::ALL[rng.gen_range(0..TraitName::ALL.len())];
            if a != b {
                connections.insert((a, b), 0.3 + 0.4 * rng.gen::<f32>());
            }
        }

        TraitProfile {
            values,
            connections,
        }
    }

    /// Builds a profile from explicit values (snapshot import).
    #[must_use]
    pub fn from_parts(
        values: BTreeMap<TraitName, f32>,
        connections: BTreeMap<(TraitName, TraitName), f32>,
    ) -> Self {
        let values = TraitName::ALL
            .iter()
            .map(|t| (*t, values.get(t).copied().unwrap_or(0.5).clamp(0.0, 1.0)))
            .collect();
        TraitProfile {
            values,
            connections,
        }
    }

    /// Current value of a trait.
    #[must_use]
    pub fn get(&self, name: TraitName) -> f32 {
        self.values.get(&name).copied().unwrap_or(0.5)
    }

    /// All trait values, keyed by name.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<TraitName, f32> {
        &self.values
    }

    /// The coupling graph.
    #[must_use]
    pub fn connections(&self) -> &BTreeMap<(TraitName, TraitName), f32> {
        &self.connections
    }

    /// Overwrites a trait value, clamped to `[0, 1]`.
    pub fn set(&mut self, name: TraitName, value: f32) {
        self.values.insert(name, value.clamp(0.0, 1.0));
    }

    /// Nudges a trait by `delta`, clamped to `[0, 1]`.
    pub fn adjust(&mut self, name: TraitName, delta: f32) {
        let value = self.get(name);
        self.set(name, value + delta);
    }

    /// Propagates couplings: each connection with strength above 0.1 pulls
    /// the target toward the source by `strength · 0.01`.
    pub fn propagate_connections(&mut self) {
        let mut deltas: BTreeMap<TraitName, f32> = BTreeMap::new();
        for ((source, target), strength) in &self.connections {
            if *strength <= 0.1 {
                continue;
            }
            let source_value = self.get(*source);
            let target_value = self.get(*target);
            let direction = if source_value > target_value { 1.0 } else { -1.0 };
            *deltas.entry(*target).or_insert(0.0) += direction * strength * 0.01;
        }
        for (name, delta) in deltas {
            self.adjust(name, delta);
        }
    }

    /// With probability 0.05, applies a uniform ±0.05 mutation to a random
    /// trait.
    pub fn maybe_mutate(&mut self, rng: &mut impl Rng) {
        if rng.gen::<f32>() < 0.05 {
            let name = TraitName::ALL[rng.gen_range(0..TraitName::ALL.len())];
            let mutation = (rng.gen::<f32>() - 0.5) * 0.1;
            self.adjust(name, mutation);
        }
    }

    /// Samples traits for exposure in a projection: each trait is included
    /// independently with probability 0.3.
    #[must_use]
    pub fn sample_for_projection(&self, rng: &mut impl Rng) -> BTreeMap<TraitName, f32> {
        self.values
            .iter()
            .filter(|_| rng.gen::<f32>() < 0.3)
            .map(|(name, value)| (*name, *value))
            .collect()
    }
}
