//! Relationship ledgers toward humans and other pets.

use crate::agent::traits::TraitProfile;
use crate::enums::TraitName;
use crate::types::PetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relationship strengths are clamped to this band.
pub const RELATIONSHIP_BOUND: f32 = 10.0;

/// Signed relationship strengths toward users and pets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipLedger {
    humans: BTreeMap<String, f32>,
    pets: BTreeMap<PetId, f32>,
}

impl RelationshipLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        RelationshipLedger::default()
    }

    /// Strength toward a human counterpart (0 when unknown).
    #[must_use]
    pub fn human(&self, user: &str) -> f32 {
        self.humans.get(user).copied().unwrap_or(0.0)
    }

    /// Strength toward another pet (0 when unknown).
    #[must_use]
    pub fn pet(&self, pet: &PetId) -> f32 {
        self.pets.get(pet).copied().unwrap_or(0.0)
    }

    /// All human relationships.
    #[must_use]
    pub fn humans(&self) -> &BTreeMap<String, f32> {
        &self.humans
    }

    /// All pet relationships.
    #[must_use]
    pub fn pets(&self) -> &BTreeMap<PetId, f32> {
        &self.pets
    }

    /// Adjusts a human relationship, scaled by personality.
    ///
    /// Positive deltas scale by `0.5 + agreeableness`, negative deltas by
    /// `0.5 + neuroticism`; the result is clamped to `[-10, 10]`.
    pub fn adjust_human(&mut self, user: &str, delta: f32, traits: &TraitProfile) {
        let scaled = if delta > 0.0 {
            delta * (0.5 + traits.get(TraitName::Agreeableness))
        } else {
            delta * (0.5 + traits.get(TraitName::Neuroticism))
        };
        let entry = self.humans.entry(user.to_string()).or_insert(0.0);
        *entry = (*entry + scaled).clamp(-RELATIONSHIP_BOUND, RELATIONSHIP_BOUND);
    }

    /// Adjusts a pet relationship, clamped to `[-10, 10]`.
    pub fn adjust_pet(&mut self, pet: &PetId, delta: f32) {
        let entry = self.pets.entry(pet.clone()).or_insert(0.0);
        *entry = (*entry + delta).clamp(-RELATIONSHIP_BOUND, RELATIONSHIP_BOUND);
    }

    /// True when every strength is inside `[-10, 10]`.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.humans
            .values()
            .chain(self.pets.values())
            .all(|v| v.abs() <= RELATIONSHIP_BOUND && v.is_finite())
    }

    /// Restores both maps from a snapshot.
    pub(crate) fn restore(&mut self, humans: BTreeMap<String, f32>, pets: BTreeMap<PetId, f32>) {
        let clamp = |v: f32| v.clamp(-RELATIONSHIP_BOUND, RELATIONSHIP_BOUND);
        self.humans = humans.into_iter().map(|(k, v)| (k, clamp(v))).collect();
        self.pets = pets.into_iter().map(|(k, v)| (k, clamp(v))).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn traits_with(agreeableness: f32, neuroticism: f32) -> TraitProfile {
        let mut rng = StdRng::seed_from_u64(42);
        let mut traits = TraitProfile::generate(&mut rng);
        traits.set(TraitName::Agreeableness, agreeableness);
        traits.set(TraitName::Neuroticism, neuroticism);
        traits
    }

    #[test]
    fn agreeable_pets_bond_faster() {
        let mut warm = RelationshipLedger::new();
        let mut cold = RelationshipLedger::new();
        warm.adjust_human("user_1", 1.0, &traits_with(1.0, 0.5));
        cold.adjust_human("user_1", 1.0, &traits_with(0.0, 0.5));
        assert!(warm.human("user_1") > cold.human("user_1"));
    }

    #[test]
    fn neurotic_pets_sour_faster() {
        let mut anxious = RelationshipLedger::new();
        let mut stable = RelationshipLedger::new();
        anxious.adjust_human("user_1", -1.0, &traits_with(0.5, 1.0));
        stable.adjust_human("user_1", -1.0, &traits_with(0.5, 0.0));
        assert!(anxious.human("user_1") < stable.human("user_1"));
    }

    #[test]
    fn strengths_clamp_to_band() {
        let mut ledger = RelationshipLedger::new();
        let traits = traits_with(1.0, 0.5);
        for _ in 0..50 {
            ledger.adjust_human("user_1", 5.0, &traits);
        }
        assert!((ledger.human("user_1") - RELATIONSHIP_BOUND).abs() < f32::EPSILON);

        let pet = PetId::new("pet_2").unwrap();
        for _ in 0..50 {
            ledger.adjust_pet(&pet, -5.0);
        }
        assert!((ledger.pet(&pet) + RELATIONSHIP_BOUND).abs() < f32::EPSILON);
        assert!(ledger.in_bounds());
    }

    #[test]
    fn unknown_counterparts_read_as_neutral() {
        let ledger = RelationshipLedger::new();
        assert!(ledger.human("stranger").abs() < f32::EPSILON);
        assert!(ledger.pet(&PetId::new("pet_x").unwrap()).abs() < f32::EPSILON);
    }
}
