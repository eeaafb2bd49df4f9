//! The per-pet energy economy.
//!
//! Each tick the energy system collects intake from the sensed environment,
//! allocates the pool across competing functions in strict priority order,
//! funds boundary maintenance, maintains outward projections and advances
//! element integration. The boundary always eats first; reproduction only
//! sees energy when the tank is nearly full.

use crate::boundary::{
    AssimilationResult, BoundarySnapshot, BoundaryStatus, BoundarySystem, BoundaryUpdate,
    EffectMap, ElementDescriptor, ExchangeSystem, IntegrationEvent, ProjectionStatus,
};
use crate::environment::{EnvView, Environment};
use crate::types::{PetId, ProjectionId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum storable energy.
pub const MAX_ENERGY: f32 = 100.0;

/// Fixed intake contributed by each assimilated element.
const ELEMENT_INTAKE: f32 = 0.5;

/// Error returned when a consumption request exceeds the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct InsufficientEnergy {
    pub requested: f32,
    pub available: f32,
}

impl fmt::Display for InsufficientEnergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Insufficient energy: requested {:.1}, available {:.1}",
            self.requested, self.available
        )
    }
}

impl std::error::Error for InsufficientEnergy {}

/// Energy granted to each function this tick, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyAllocations {
    pub boundary: f32,
    pub critical: f32,
    pub growth: f32,
    pub social: f32,
    pub exploration: f32,
    pub reproduction: f32,
}

/// Record of one energy cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    pub starting_energy: f32,
    pub intake: f32,
    pub allocations: EnergyAllocations,
    pub boundary: BoundaryUpdate,
    pub projection_statuses: BTreeMap<ProjectionId, ProjectionStatus>,
    pub integration_events: Vec<IntegrationEvent>,
    pub ending_energy: f32,
    pub energy_percent: f32,
}

/// Owns the energy pool, the boundary and the exchange system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySystem {
    energy: f32,
    boundary: BoundarySystem,
    exchange: ExchangeSystem,
}

impl EnergySystem {
    /// Creates an energy system starting at the given level.
    #[must_use]
    pub fn new(pet_id: PetId, initial_energy: f32) -> Self {
        EnergySystem {
            energy: initial_energy.clamp(0.0, MAX_ENERGY),
            boundary: BoundarySystem::new(),
            exchange: ExchangeSystem::new(pet_id),
        }
    }

    /// Current energy level in `[0, 100]`.
    #[must_use]
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// The owned boundary system.
    #[must_use]
    pub fn boundary(&self) -> &BoundarySystem {
        &self.boundary
    }

    /// Mutable access to the boundary for behaviour effects.
    pub fn boundary_mut(&mut self) -> &mut BoundarySystem {
        &mut self.boundary
    }

    /// The owned exchange system.
    #[must_use]
    pub fn exchange(&self) -> &ExchangeSystem {
        &self.exchange
    }

    /// Overwrites the energy level (snapshot import, test setup).
    pub fn set_energy(&mut self, energy: f32) {
        self.energy = energy.clamp(0.0, MAX_ENERGY);
    }

    /// Runs one energy cycle.
    ///
    /// 1. Intake: food scaled by permeability, ambient scaled by boundary
    ///    size, a fixed trickle per assimilated element.
    /// 2. Allocation down the priority ladder.
    /// 3. Boundary maintenance funded by its allocation.
    /// 4. Projection maintenance and element integration.
    pub fn step(
        &mut self,
        view: &EnvView,
        env: &mut Environment,
        tick: u64,
        rng: &mut impl Rng,
    ) -> EnergyReport {
        let starting_energy = self.energy;

        let intake = self.collect_intake(view);
        self.energy = (self.energy + intake).min(MAX_ENERGY);

        let allocations = self.allocate();

        let boundary_update = self.boundary.update(view, allocations.boundary);
        self.energy = (self.energy - boundary_update.consumed).max(0.0);

        let projection_statuses = self.exchange.maintain_projections(env);
        let integration_events = self.exchange.integrate_elements(&mut self.boundary, rng);
        tracing::trace!(tick, intake, ending = self.energy, "energy cycle");

        EnergyReport {
            starting_energy,
            intake,
            allocations,
            boundary: boundary_update,
            projection_statuses,
            integration_events,
            ending_energy: self.energy,
            energy_percent: self.energy / MAX_ENERGY * 100.0,
        }
    }

    fn collect_intake(&self, view: &EnvView) -> f32 {
        let mut collected = 0.0;

        // Global resource pools reach the intake only through the full view
        // tier; a tighter boundary feeds on ambient energy alone.
        if let Some(food) = view.resources.get("food") {
            let absorption = 0.5 + 0.5 * self.boundary.permeability();
            collected += food * absorption;
        }

        collected += view.ambient_energy * self.boundary.size() * 0.8;
        collected += ELEMENT_INTAKE * self.boundary.assimilated().len() as f32;

        collected
    }

    /// Allocates the pool down the priority ladder.
    ///
    /// Boundary takes 20% (50% once permeability passes 0.7), critical takes
    /// 20% of the remainder, growth 30% above half charge, social 20% above
    /// 30%, exploration 15% above 40%, reproduction everything left above
    /// 80%.
    fn allocate(&self) -> EnergyAllocations {
        let mut remaining = self.energy;
        let mut allocations = EnergyAllocations::default();

        let boundary_percent = if self.boundary.permeability() > 0.7 {
            0.5
        } else {
            0.2
        };
        allocations.boundary = remaining * boundary_percent;
        remaining -= allocations.boundary;

        allocations.critical = remaining * 0.2;
        remaining -= allocations.critical;

        if self.energy > MAX_ENERGY * 0.5 {
            allocations.growth = remaining * 0.3;
            remaining -= allocations.growth;
        }

        if self.energy > MAX_ENERGY * 0.3 {
            allocations.social = remaining * 0.2;
            remaining -= allocations.social;
        }

        if self.energy > MAX_ENERGY * 0.4 {
            allocations.exploration = remaining * 0.15;
            remaining -= allocations.exploration;
        }

        if self.energy > MAX_ENERGY * 0.8 {
            allocations.reproduction = remaining;
        }

        allocations
    }

    /// Adds energy from an external source (feeding, sunbathing).
    pub fn add_energy(&mut self, amount: f32, source: &str) -> f32 {
        tracing::trace!(amount, source, "energy added");
        self.energy = (self.energy + amount).min(MAX_ENERGY);
        self.energy
    }

    /// Consumes energy for a named purpose.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientEnergy`] without consuming anything when the
    /// pool cannot cover the request.
    pub fn consume_energy(&mut self, amount: f32, purpose: &str) -> Result<f32, InsufficientEnergy> {
        if amount > self.energy {
            return Err(InsufficientEnergy {
                requested: amount,
                available: self.energy,
            });
        }
        tracing::trace!(amount, purpose, "energy consumed");
        self.energy -= amount;
        Ok(self.energy)
    }

    /// Combined effects of all assimilated elements, weighted by their
    /// integration levels.
    #[must_use]
    pub fn assimilated_elements_effects(&self) -> EffectMap {
        let mut combined = EffectMap::new();
        for element in self.boundary.assimilated().values() {
            for (name, value) in element.weighted_effects() {
                *combined.entry(name).or_insert(0.0) += value;
            }
        }
        combined
    }

    /// Routes an assimilation attempt through the exchange and boundary.
    pub fn try_assimilate(
        &mut self,
        element: &ElementDescriptor,
        tick: u64,
        rng: &mut impl Rng,
    ) -> AssimilationResult {
        self.exchange
            .assimilate_element(element, &mut self.boundary, tick, rng)
    }

    /// Mutable split access for operations that need both halves.
    pub fn exchange_and_boundary_mut(&mut self) -> (&mut ExchangeSystem, &mut BoundarySystem) {
        (&mut self.exchange, &mut self.boundary)
    }

    /// Boundary snapshot for reports.
    #[must_use]
    pub fn boundary_snapshot(&self) -> BoundarySnapshot {
        self.boundary.status()
    }

    /// Whether the last boundary update failed is carried by the report;
    /// convenience predicate for behaviour rules.
    #[must_use]
    pub fn boundary_is_failing(&self, report: &EnergyReport) -> bool {
        report.boundary.status == BoundaryStatus::Failing
    }
}
