//! Regions: bounded areas with features, resources and visiting pets.

use crate::boundary::EffectMap;
use crate::enums::{ProjectionKind, TraitName};
use crate::types::{PetId, ProjectionId, RegionId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A static descriptor of something a region offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFeature {
    /// Feature kind, e.g. `social_hub`, `rest_spot`, `playground`.
    pub kind: String,
    /// Strength or quality in `[0, 1]`.
    pub strength: f32,
    /// Structural complexity; gates assimilation at 0.8.
    pub complexity: f32,
    /// Effects conferred if the feature is assimilated.
    pub effect: EffectMap,
}

/// A replenishing resource pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub amount: f32,
    /// Regeneration ceiling.
    pub cap: f32,
    /// Per-tick regeneration rate.
    pub regen: f32,
}

impl ResourcePool {
    /// Creates a pool filled to its cap.
    #[must_use]
    pub fn full(cap: f32, regen: f32) -> Self {
        ResourcePool {
            amount: cap,
            cap,
            regen,
        }
    }

    /// Advances regeneration by one tick.
    pub fn regenerate(&mut self) {
        self.amount = (self.amount + self.regen).min(self.cap);
    }

    /// Takes up to `wanted` from the pool, returning what was granted.
    pub fn take(&mut self, wanted: f32) -> f32 {
        let granted = wanted.min(self.amount).max(0.0);
        self.amount -= granted;
        granted
    }
}

/// A region of the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub features: Vec<RegionFeature>,
    pub resources: BTreeMap<String, ResourcePool>,
    pub current_pets: BTreeSet<PetId>,
}

impl Region {
    /// Advances resource regeneration by one tick.
    pub fn regenerate(&mut self) {
        for pool in self.resources.values_mut() {
            pool.regenerate();
        }
    }
}

/// A projection stored by the environment on behalf of its originator.
///
/// The originating pet retains only the ID; storage, stability bookkeeping
/// and removal belong to the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub id: ProjectionId,
    pub kind: ProjectionKind,
    pub source_pet: PetId,
    pub region: RegionId,
    /// Stability in `[0, 1]`; the projection dissipates at zero.
    pub stability: f32,
    /// Named scalar properties (strength, intensity, quality ...).
    pub properties: BTreeMap<String, f32>,
    /// Trait values the originator chose to expose.
    pub trait_sample: BTreeMap<TraitName, f32>,
    /// Tick of creation.
    pub created_at: u64,
}
