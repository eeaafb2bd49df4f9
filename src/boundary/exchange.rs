//! Exchange of discrete elements across the boundary.
//!
//! The exchange system scans the sensed environment for assimilable
//! elements, routes assimilation attempts through the boundary gate,
//! projects parts of the pet outward, and keeps its projections alive
//! against the environment's decay rules.

use crate::boundary::boundary_system::{AssimilationOutcome, BoundaryRefusal, BoundarySystem};
use crate::boundary::element::{EffectMap, ElementDescriptor, ElementSource};
use crate::enums::{ElementKind, ProjectionKind, TraitName};
use crate::environment::{EnvView, Environment, Projection};
use crate::types::{ElementId, PetId, ProjectionId, RegionId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Features at or above this complexity resist assimilation.
const FEATURE_COMPLEXITY_GATE: f32 = 0.8;
/// Minimum compatibility for another pet's projection to be assimilable.
const PROJECTION_COMPAT_GATE: f32 = 0.3;
/// Minimum permeability required to project outward.
const PROJECTION_PERMEABILITY_GATE: f32 = 0.3;

/// Result of an assimilation attempt, with effects on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssimilationResult {
    pub outcome: AssimilationOutcome,
    /// Effects conferred; empty on refusal.
    pub effects: EffectMap,
}

/// Why an outward projection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionRefusal {
    /// Permeability below 0.3; nothing can cross outward.
    InsufficientPermeability,
}

impl std::fmt::Display for ProjectionRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionRefusal::InsufficientPermeability => {
                write!(f, "projection refused: insufficient permeability")
            }
        }
    }
}

/// Per-projection status after a maintenance pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStatus {
    /// Still standing, with its remaining stability.
    Maintained { stability: f32 },
    /// Stability reached zero; removed from the environment.
    Dissipated,
    /// The hosting region disappeared; removed.
    RegionLost,
}

/// Integration progress for one element on one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationEvent {
    pub element_id: ElementId,
    pub new_level: f32,
}

/// Moves elements across the boundary in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeSystem {
    pet_id: PetId,
    /// Own projections and the regions hosting them.
    projections: BTreeMap<ProjectionId, RegionId>,
    projection_counter: u64,
}

impl ExchangeSystem {
    /// Creates an exchange system for the given pet.
    #[must_use]
    pub fn new(pet_id: PetId) -> Self {
        ExchangeSystem {
            pet_id,
            projections: BTreeMap::new(),
            projection_counter: 0,
        }
    }

    /// IDs of the projections this pet currently maintains.
    #[must_use]
    pub fn projection_ids(&self) -> Vec<ProjectionId> {
        self.projections.keys().cloned().collect()
    }

    /// Scans the sensed environment for assimilable elements.
    ///
    /// Features qualify below the complexity gate; resources always qualify
    /// while stocked; other pets' projections qualify when compatible with
    /// this pet's traits; ambient energy always qualifies.
    #[must_use]
    pub fn scan_environment(
        &self,
        view: &EnvView,
        traits: &BTreeMap<TraitName, f32>,
    ) -> Vec<ElementDescriptor> {
        let mut elements = Vec::new();

        for (region_id, region) in &view.regions {
            for feature in &region.features {
                if feature.complexity < FEATURE_COMPLEXITY_GATE {
                    elements.push(ElementDescriptor {
                        source: ElementSource::Feature {
                            name: feature.kind.clone(),
                            complexity: feature.complexity,
                            effect: feature.effect.clone(),
                        },
                        region: Some(region_id.clone()),
                        difficulty: ElementKind::Feature.default_difficulty(),
                    });
                }
            }

            for (name, amount) in &region.resources {
                if *amount > 0.0 && name != "ambient_energy" {
                    elements.push(ElementDescriptor {
                        source: ElementSource::Resource {
                            name: name.clone(),
                            amount: *amount,
                        },
                        region: Some(region_id.clone()),
                        difficulty: ElementKind::Resource.default_difficulty(),
                    });
                }
            }

            for projection in &region.projections {
                if projection.source_pet == self.pet_id {
                    continue;
                }
                let compat = projection_compatibility(traits, &projection.trait_sample);
                if compat > PROJECTION_COMPAT_GATE {
                    elements.push(ElementDescriptor {
                        source: ElementSource::PetProjection {
                            projection_id: projection.id.clone(),
                            source_pet: projection.source_pet.clone(),
                            projection_kind: projection.kind,
                            trait_sample: projection.trait_sample.clone(),
                        },
                        region: Some(region_id.clone()),
                        difficulty: ElementKind::PetProjection.default_difficulty(),
                    });
                }
            }
        }

        if view.ambient_energy > 0.0 {
            elements.push(ElementDescriptor {
                source: ElementSource::AmbientEnergy {
                    amount: view.ambient_energy,
                },
                region: None,
                difficulty: ElementKind::AmbientEnergy.default_difficulty(),
            });
        }

        elements
    }

    /// Attempts to assimilate an element through the boundary gate.
    pub fn assimilate_element(
        &mut self,
        element: &ElementDescriptor,
        boundary: &mut BoundarySystem,
        tick: u64,
        rng: &mut impl Rng,
    ) -> AssimilationResult {
        let outcome = boundary.attempt_assimilation(element, element.difficulty, tick, rng);
        let effects = if outcome.is_success() {
            element.effects()
        } else {
            EffectMap::new()
        };
        AssimilationResult { outcome, effects }
    }

    /// Projects part of the pet into the environment.
    ///
    /// The environment owns the projection's storage; this pet retains only
    /// the ID. The projection becomes visible to other pets next tick.
    ///
    /// # Errors
    ///
    /// Refused when boundary permeability is below 0.3.
    pub fn project_to_environment(
        &mut self,
        kind: ProjectionKind,
        properties: BTreeMap<String, f32>,
        trait_sample: BTreeMap<TraitName, f32>,
        region_id: RegionId,
        boundary: &BoundarySystem,
        env: &mut Environment,
        tick: u64,
    ) -> Result<ProjectionId, ProjectionRefusal> {
        if boundary.permeability() < PROJECTION_PERMEABILITY_GATE {
            return Err(ProjectionRefusal::InsufficientPermeability);
        }

        self.projection_counter += 1;
        let id = ProjectionId::new(format!(
            "{}_proj_{}",
            self.pet_id.as_str(),
            self.projection_counter
        ))
        .expect("counter-generated IDs are never empty");

        env.add_pet_projection(Projection {
            id: id.clone(),
            kind,
            source_pet: self.pet_id.clone(),
            region: region_id.clone(),
            stability: 0.5,
            properties,
            trait_sample,
            created_at: tick,
        });
        self.projections.insert(id.clone(), region_id);
        Ok(id)
    }

    /// Maintains this pet's projections against the environment's decay.
    ///
    /// Stability moves by −0.05 base, +0.02 per matching region feature,
    /// +0.05 when the originator is present, −0.01 per other pet in the
    /// region. Projections at zero stability dissipate.
    pub fn maintain_projections(
        &mut self,
        env: &mut Environment,
    ) -> BTreeMap<ProjectionId, ProjectionStatus> {
        let mut statuses = BTreeMap::new();
        let ids: Vec<ProjectionId> = self.projections.keys().cloned().collect();

        for id in ids {
            let Some(projection) = env.projection(&id) else {
                // Not yet committed (created this tick) or already gone;
                // skip the former, forget the latter.
                continue;
            };
            let region_id = projection.region.clone();
            let kind = projection.kind;
            let stability = projection.stability;

            let Some(region) = env.region(&region_id) else {
                env.remove_pet_projection(&id);
                self.projections.remove(&id);
                statuses.insert(id, ProjectionStatus::RegionLost);
                continue;
            };

            let mut change = -0.05;
            for feature in &region.features {
                if feature.kind == kind.as_str() {
                    change += 0.02;
                }
            }
            let originator_present = region.current_pets.contains(&self.pet_id);
            if originator_present {
                change += 0.05;
            }
            let other_pets = region
                .current_pets
                .iter()
                .filter(|p| **p != self.pet_id)
                .count();
            change -= 0.01 * other_pets as f32;

            let new_stability = (stability + change).clamp(0.0, 1.0);
            match env.set_projection_stability(&id, new_stability) {
                Some(remaining) => {
                    statuses.insert(id, ProjectionStatus::Maintained { stability: remaining });
                }
                None => {
                    self.projections.remove(&id);
                    statuses.insert(id, ProjectionStatus::Dissipated);
                }
            }
        }

        statuses
    }

    /// Advances integration of assimilated elements.
    ///
    /// Each element progresses by 0.1 (capped at 1.0) with probability
    /// `0.1 · (1 − integration)`.
    pub fn integrate_elements(
        &mut self,
        boundary: &mut BoundarySystem,
        rng: &mut impl Rng,
    ) -> Vec<IntegrationEvent> {
        let mut events = Vec::new();
        for element in boundary.assimilated_mut().values_mut() {
            let chance = 0.1 * (1.0 - element.integration);
            if rng.gen::<f32>() < chance {
                element.integration = (element.integration + 0.1).min(1.0);
                events.push(IntegrationEvent {
                    element_id: element.id.clone(),
                    new_level: element.integration,
                });
            }
        }
        events
    }

    /// Releases an assimilated element back through the boundary.
    pub fn release_element(
        &mut self,
        element_id: &ElementId,
        boundary: &mut BoundarySystem,
    ) -> Result<(), BoundaryRefusal> {
        boundary.release_element(element_id)
    }

    /// Restores projection bookkeeping during snapshot import.
    pub(crate) fn restore_projections(&mut self, projections: BTreeMap<ProjectionId, RegionId>) {
        self.projection_counter = projections.len() as u64;
        self.projections = projections;
    }

    /// Current projection bookkeeping for snapshot export.
    #[must_use]
    pub(crate) fn projection_map(&self) -> &BTreeMap<ProjectionId, RegionId> {
        &self.projections
    }
}

/// Compatibility between a pet's traits and an exposed trait sample.
///
/// Neutral 0.5 when the sample is empty; otherwise one minus the mean
/// absolute trait distance.
#[must_use]
pub fn projection_compatibility(
    traits: &BTreeMap<TraitName, f32>,
    sample: &BTreeMap<TraitName, f32>,
) -> f32 {
    if sample.is_empty() {
        return 0.5;
    }
    let mut total = 0.0;
    let mut count = 0;
    for (name, value) in sample {
        let own = traits.get(name).copied().unwrap_or(0.5);
        total += (own - value).abs();
        count += 1;
    }
    (1.0 - total / count as f32).clamp(0.0, 1.0)
}
