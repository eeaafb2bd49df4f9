//! Tiered pet views of the environment.
//!
//! A pet never reads the environment directly; it requests a view scoped by
//! its boundary permeability. Fields are additive across the three tiers:
//!
//! - below 0.3: time of day, weather, attenuated ambient energy, own region
//! - 0.3 to 0.7: adds day of week, weather effects, social atmosphere, full
//!   detail for the pet's own region, probabilistic glimpses of the rest
//! - 0.7 and above: the full environment plus a competing-pets list

use crate::boundary::EffectMap;
use crate::enums::{ProjectionKind, TraitName, Weather, WeatherEffects};
use crate::types::{PetId, ProjectionId, RegionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A feature of a region as seen through a pet view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureView {
    /// Feature kind, e.g. `social_hub` or `rest_spot`.
    pub kind: String,
    /// Strength or quality of the feature in `[0, 1]`.
    pub strength: f32,
    /// Structural complexity; features at 0.8 or above resist assimilation.
    pub complexity: f32,
    /// Effects conferred when the feature is assimilated.
    pub effect: EffectMap,
}

/// A projection as seen through a pet view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionView {
    pub id: ProjectionId,
    pub kind: ProjectionKind,
    pub source_pet: PetId,
    pub region: RegionId,
    /// Remaining stability in `[0, 1]`.
    pub stability: f32,
    /// Trait values the originator chose to expose.
    pub trait_sample: BTreeMap<TraitName, f32>,
}

/// A region as seen through a pet view.
///
/// Depending on the view tier, a region may reveal only a subset of its
/// features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RegionView {
    pub features: Vec<FeatureView>,
    pub resources: BTreeMap<String, f32>,
    pub current_pets: Vec<PetId>,
    pub projections: Vec<ProjectionView>,
}

/// The environment as sensed by a single pet on a single tick.
///
/// Optional fields are absent below the tier that reveals them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvView {
    /// Hour of day in `[0, 24)`.
    pub time_of_day: f32,
    pub weather: Weather,
    /// Ambient energy, attenuated by permeability at the lowest tier.
    pub ambient_energy: f32,
    /// The pet's current region.
    pub current_region: RegionId,

    // Mid tier and above.
    pub day_of_week: Option<u8>,
    pub weather_effects: Option<WeatherEffects>,
    pub social_atmosphere: Option<f32>,

    // Full tier only.
    pub emotional_tone: Option<f32>,
    pub novelty_level: Option<f32>,
    pub temperature: Option<f32>,
    /// Global resource pools.
    pub resources: BTreeMap<String, f32>,
    /// Regions visible at this tier, keyed by ID.
    pub regions: BTreeMap<RegionId, RegionView>,
    /// Pets in other regions, revealed only at the full tier.
    pub competing_pets: Vec<PetId>,
}

impl EnvView {
    /// Returns the view of the pet's own region, if visible.
    #[must_use]
    pub fn own_region(&self) -> Option<&RegionView> {
        self.regions.get(&self.current_region)
    }

    /// Region IDs visible in this view.
    #[must_use]
    pub fn region_ids(&self) -> Vec<RegionId> {
        self.regions.keys().cloned().collect()
    }
}
