//! Environmental elements: what crosses the boundary and what it does.

use crate::enums::{ElementKind, ProjectionKind, TraitName};
use crate::types::{ElementId, PetId, ProjectionId, RegionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named scalar effects conferred by an assimilated element.
///
/// Keys are effect names (`energy`, `intelligence`, `charisma`,
/// `social_connection`, or whatever a feature declares); iteration order is
/// stable so replays are too.
pub type EffectMap = BTreeMap<String, f32>;

/// The concrete identity of an assimilable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ElementSource {
    /// A structural feature of a region.
    Feature {
        name: String,
        complexity: f32,
        effect: EffectMap,
    },
    /// A named regional resource.
    Resource { name: String, amount: f32 },
    /// Another pet's projection.
    PetProjection {
        projection_id: ProjectionId,
        source_pet: PetId,
        projection_kind: ProjectionKind,
        trait_sample: BTreeMap<TraitName, f32>,
    },
    /// Free-floating ambient energy.
    AmbientEnergy { amount: f32 },
}

/// An element a pet could attempt to assimilate, as produced by an
/// environment scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub source: ElementSource,
    /// Region the element was seen in, when it has one.
    pub region: Option<RegionId>,
    /// Assimilation difficulty in `[0, 1]`.
    pub difficulty: f32,
}

impl ElementDescriptor {
    /// The element kind of this descriptor.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self.source {
            ElementSource::Feature { .. } => ElementKind::Feature,
            ElementSource::Resource { .. } => ElementKind::Resource,
            ElementSource::PetProjection { .. } => ElementKind::PetProjection,
            ElementSource::AmbientEnergy { .. } => ElementKind::AmbientEnergy,
        }
    }

    /// Computes the effect map conferred if this element is assimilated.
    ///
    /// Features copy their declared effects. Resources map their name to a
    /// fixed effect scaled by amount. Projections confer a social-connection
    /// bonus plus a copy of any exposed traits.
    #[must_use]
    pub fn effects(&self) -> EffectMap {
        let mut effects = EffectMap::new();
        match &self.source {
            ElementSource::Feature { effect, .. } => {
                effects = effect.clone();
            }
            ElementSource::Resource { name, amount } => match name.as_str() {
                "food" => {
                    effects.insert("energy".to_string(), amount * 2.0);
                }
                "knowledge" => {
                    effects.insert("intelligence".to_string(), amount * 0.1);
                }
                "social" => {
                    effects.insert("charisma".to_string(), amount * 0.1);
                }
                _ => {}
            },
            ElementSource::PetProjection { trait_sample, .. } => {
                effects.insert("social_connection".to_string(), 0.2);
                for (name, value) in trait_sample {
                    effects.insert(format!("trait_{}", name.as_str()), *value);
                }
            }
            ElementSource::AmbientEnergy { amount } => {
                effects.insert("energy".to_string(), amount * 0.5);
            }
        }
        effects
    }
}

/// An element that has crossed the boundary and is integrating into the pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssimilatedElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Base effects at full integration.
    pub effects: EffectMap,
    /// Integration level in `[0, 1]`; starts at 0.1 and ratchets upward.
    pub integration: f32,
    /// Tick at which the element was assimilated.
    pub assimilated_at: u64,
}

impl AssimilatedElement {
    /// Effects weighted by the current integration level.
    #[must_use]
    pub fn weighted_effects(&self) -> EffectMap {
        self.effects
            .iter()
            .map(|(name, value)| (name.clone(), value * self.integration))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_resource_maps_to_energy() {
        let descriptor = ElementDescriptor {
            source: ElementSource::Resource {
                name: "food".to_string(),
                amount: 5.0,
            },
            region: None,
            difficulty: 0.3,
        };
        let effects = descriptor.effects();
        assert!((effects["energy"] - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_resource_confers_nothing() {
        let descriptor = ElementDescriptor {
            source: ElementSource::Resource {
                name: "gravel".to_string(),
                amount: 5.0,
            },
            region: None,
            difficulty: 0.3,
        };
        assert!(descriptor.effects().is_empty());
    }

    #[test]
    fn projection_confers_social_connection() {
        let descriptor = ElementDescriptor {
            source: ElementSource::PetProjection {
                projection_id: ProjectionId::new("proj_1").unwrap(),
                source_pet: PetId::new("pet_a").unwrap(),
                projection_kind: ProjectionKind::SocialSignal,
                trait_sample: BTreeMap::from([(TraitName::Playfulness, 0.8)]),
            },
            region: None,
            difficulty: 0.7,
        };
        let effects = descriptor.effects();
        assert!((effects["social_connection"] - 0.2).abs() < f32::EPSILON);
        assert!((effects["trait_playfulness"] - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn weighted_effects_scale_with_integration() {
        let element = AssimilatedElement {
            id: ElementId::new("element_1").unwrap(),
            kind: ElementKind::Resource,
            effects: EffectMap::from([("energy".to_string(), 10.0)]),
            integration: 0.5,
            assimilated_at: 0,
        };
        assert!((element.weighted_effects()["energy"] - 5.0).abs() < f32::EPSILON);
    }
}
