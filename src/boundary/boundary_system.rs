//! The fluid boundary between a pet and its environment.
//!
//! The boundary is a dynamic, energy-consuming interface. Permeability
//! controls how easily environmental influence crosses in either direction;
//! size scales the maintenance bill. Underfunded maintenance loosens the
//! boundary instead of crashing it: permeability drifts up, size shrinks,
//! and the tick reports a failing status.

use crate::boundary::element::{AssimilatedElement, ElementDescriptor};
use crate::environment::EnvView;
use crate::types::ElementId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower permeability bound; the boundary never closes completely.
pub const MIN_PERMEABILITY: f32 = 0.1;
/// Upper permeability bound.
pub const MAX_PERMEABILITY: f32 = 1.0;
/// Lower size bound under maintenance failure.
pub const MIN_SIZE: f32 = 0.2;
/// Upper size bound.
pub const MAX_SIZE: f32 = 2.0;

/// Whether the boundary met its maintenance bill this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryStatus {
    Maintained,
    Failing,
}

/// Result of one boundary maintenance step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryUpdate {
    /// Energy actually consumed (never exceeds what was available).
    pub consumed: f32,
    pub status: BoundaryStatus,
    pub permeability: f32,
    pub size: f32,
}

/// Why an assimilation or release attempt was refused.
///
/// These are policy outcomes, not errors: they are returned as data and
/// become part of the tick report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRefusal {
    /// Permeability below 0.2; nothing can cross inward.
    BoundaryTooRigid,
    /// The probability roll against permeability and difficulty failed.
    AssimilationFailed,
    /// No assimilated element with the given ID.
    ElementNotFound,
}

/// Outcome of an assimilation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssimilationOutcome {
    Assimilated {
        element_id: ElementId,
        /// Initial integration level (always 0.1).
        integration: f32,
    },
    Refused(BoundaryRefusal),
}

impl AssimilationOutcome {
    /// Returns true for the `Assimilated` variant.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AssimilationOutcome::Assimilated { .. })
    }
}

/// Point-in-time snapshot of the boundary scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySnapshot {
    pub permeability: f32,
    pub size: f32,
    pub maintenance_cost: f32,
    pub assimilated_count: usize,
}

/// Maintains permeability, size and the set of assimilated elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySystem {
    permeability: f32,
    size: f32,
    /// Base energy cost per tick, before size and pressure scaling.
    maintenance_cost: f32,
    assimilated: BTreeMap<ElementId, AssimilatedElement>,
    element_counter: u64,
}

impl Default for BoundarySystem {
    fn default() -> Self {
        BoundarySystem::new()
    }
}

impl BoundarySystem {
    /// Creates a boundary at the neutral starting point.
    #[must_use]
    pub fn new() -> Self {
        BoundarySystem {
            permeability: 0.5,
            size: 1.0,
            maintenance_cost: 1.0,
            assimilated: BTreeMap::new(),
            element_counter: 0,
        }
    }

    /// Current permeability in `[0.1, 1.0]`.
    #[must_use]
    pub fn permeability(&self) -> f32 {
        self.permeability
    }

    /// Current size in `[0.2, 2.0]`.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Current base maintenance cost.
    #[must_use]
    pub fn maintenance_cost(&self) -> f32 {
        self.maintenance_cost
    }

    /// The assimilated elements, keyed by ID.
    #[must_use]
    pub fn assimilated(&self) -> &BTreeMap<ElementId, AssimilatedElement> {
        &self.assimilated
    }

    /// Mutable access for integration progress.
    pub(crate) fn assimilated_mut(&mut self) -> &mut BTreeMap<ElementId, AssimilatedElement> {
        &mut self.assimilated
    }

    /// Nudges permeability by `delta`, clamping into the legal band.
    ///
    /// Behaviours (shelter seeking, boundary work) and FEP surprise spikes
    /// adjust permeability through this single entry point.
    pub fn adjust_permeability(&mut self, delta: f32, floor: f32) {
        let floor = floor.max(MIN_PERMEABILITY);
        self.permeability = (self.permeability + delta).clamp(floor, MAX_PERMEABILITY);
    }

    /// Raises permeability by `delta`, capped at the given ceiling.
    pub fn raise_permeability(&mut self, delta: f32, ceiling: f32) {
        let ceiling = ceiling.min(MAX_PERMEABILITY);
        self.permeability = (self.permeability + delta).min(ceiling).max(MIN_PERMEABILITY);
    }

    /// Nudges size by `delta`, clamping to the given ceiling.
    pub fn adjust_size(&mut self, delta: f32, ceiling: f32) {
        let ceiling = ceiling.min(MAX_SIZE);
        self.size = (self.size + delta).clamp(MIN_SIZE, ceiling);
    }

    /// Scales the base maintenance cost (deep sleep heals the boundary).
    pub fn scale_maintenance_cost(&mut self, factor: f32) {
        self.maintenance_cost *= factor;
    }

    /// Restores scalar state from a snapshot during import.
    pub(crate) fn restore(
        &mut self,
        permeability: f32,
        size: f32,
        maintenance_cost: f32,
        assimilated: BTreeMap<ElementId, AssimilatedElement>,
    ) {
        self.permeability = permeability.clamp(MIN_PERMEABILITY, MAX_PERMEABILITY);
        self.size = size.clamp(MIN_SIZE, MAX_SIZE);
        self.maintenance_cost = maintenance_cost;
        self.element_counter = assimilated.len() as u64;
        self.assimilated = assimilated;
    }

    /// Runs one maintenance step against the given energy budget.
    ///
    /// The bill is `base_cost · size · (1 + environmental_pressure)`. An
    /// underfunded boundary loosens: permeability +0.1, size −0.05, status
    /// failing. A funded boundary tightens slowly: permeability −0.01.
    pub fn update(&mut self, view: &EnvView, available_energy: f32) -> BoundaryUpdate {
        let pressure = environmental_pressure(view);
        let cost = self.maintenance_cost * self.size * (1.0 + pressure);

        let status = if available_energy < cost {
            self.permeability = (self.permeability + 0.1).min(MAX_PERMEABILITY);
            self.size = (self.size - 0.05).max(MIN_SIZE);
            BoundaryStatus::Failing
        } else {
            self.permeability = (self.permeability - 0.01).max(MIN_PERMEABILITY);
            BoundaryStatus::Maintained
        };

        BoundaryUpdate {
            consumed: cost.min(available_energy),
            status,
            permeability: self.permeability,
            size: self.size,
        }
    }

    /// Attempts to pull an element across the boundary.
    ///
    /// Refused outright below permeability 0.2; otherwise succeeds with
    /// probability `permeability · (1 − difficulty)`. Success grows the
    /// boundary by 0.1 (capped at 2.0) and records the element at
    /// integration 0.1.
    pub fn attempt_assimilation(
        &mut self,
        element: &ElementDescriptor,
        difficulty: f32,
        tick: u64,
        rng: &mut impl Rng,
    ) -> AssimilationOutcome {
        if self.permeability < 0.2 {
            return AssimilationOutcome::Refused(BoundaryRefusal::BoundaryTooRigid);
        }

        let success_chance = self.permeability * (1.0 - difficulty);
        if rng.gen::<f32>() >= success_chance {
            return AssimilationOutcome::Refused(BoundaryRefusal::AssimilationFailed);
        }

        self.element_counter += 1;
        let element_id = ElementId::new(format!("element_{}", self.element_counter))
            .expect("counter-generated IDs are never empty");

        self.assimilated.insert(
            element_id.clone(),
            AssimilatedElement {
                id: element_id.clone(),
                kind: element.kind(),
                effects: element.effects(),
                integration: 0.1,
                assimilated_at: tick,
            },
        );
        self.size = (self.size + 0.1).min(MAX_SIZE);

        AssimilationOutcome::Assimilated {
            element_id,
            integration: 0.1,
        }
    }

    /// Releases a previously assimilated element back to the environment.
    ///
    /// Shrinks the boundary by 0.05, floored at 0.5.
    pub fn release_element(&mut self, element_id: &ElementId) -> Result<(), BoundaryRefusal> {
        if self.assimilated.remove(element_id).is_none() {
            return Err(BoundaryRefusal::ElementNotFound);
        }
        self.size = (self.size - 0.05).max(0.5);
        Ok(())
    }

    /// Snapshot of the boundary scalars for reports.
    #[must_use]
    pub fn status(&self) -> BoundarySnapshot {
        BoundarySnapshot {
            permeability: self.permeability,
            size: self.size,
            maintenance_cost: self.maintenance_cost,
            assimilated_count: self.assimilated.len(),
        }
    }
}

/// Deterministic environmental pressure against the boundary.
///
/// Fields absent from the view (low-permeability tiers) contribute nothing.
#[must_use]
pub fn environmental_pressure(view: &EnvView) -> f32 {
    let mut pressure = 0.0;

    match view.weather {
        crate::enums::Weather::Stormy => pressure += 0.3,
        crate::enums::Weather::Rainy | crate::enums::Weather::Windy => pressure += 0.1,
        _ => {}
    }

    if let Some(tone) = view.emotional_tone {
        pressure += (tone - 0.5).abs() * 0.4;
    }

    pressure += 0.05 * view.competing_pets.len() as f32;

    if let Some(social) = view.social_atmosphere {
        pressure += social * 0.2;
    }

    if let Some(novelty) = view.novelty_level {
        pressure += novelty * 0.15;
    }

    pressure
}
