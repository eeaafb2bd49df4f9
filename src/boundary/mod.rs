//! The fluid boundary: maintenance, assimilation and outward projection.
//!
//! A pet's boundary is the dynamic interface between its internal state and
//! the shared environment. [`BoundarySystem`] owns the scalars (permeability,
//! size, maintenance cost) and the assimilated-element set;
//! [`ExchangeSystem`] moves discrete elements across it in both directions.

mod boundary_system;
mod element;
mod exchange;

pub use boundary_system::{
    environmental_pressure, AssimilationOutcome, BoundaryRefusal, BoundarySnapshot,
    BoundaryStatus, BoundarySystem, BoundaryUpdate, MAX_PERMEABILITY, MAX_SIZE,
    MIN_PERMEABILITY, MIN_SIZE,
};
pub use element::{AssimilatedElement, EffectMap, ElementDescriptor, ElementSource};
pub use exchange::{
    projection_compatibility, AssimilationResult, ExchangeSystem, IntegrationEvent,
    ProjectionRefusal, ProjectionStatus,
};
