//! Companion Dynamics
//!
//! Tick-driven simulation core for autonomous digital pet agents.
//!
//! A population of pets evolves physiological, cognitive and relational
//! state in response to a shared stochastic environment and user
//! interactions delivered as emoji sequences or typed care actions.
//!
//! # Core Concepts
//!
//! - **PetAgent**: an autonomous agent composing the five subsystems below
//! - **EnergySystem**: per-tick intake and priority-ordered allocation,
//!   owning the boundary and exchange systems
//! - **BoundarySystem**: the fluid, energy-consuming interface between pet
//!   and environment (permeability and size)
//! - **ExchangeSystem**: assimilation of environmental elements and outward
//!   projections
//! - **CognitiveDevelopment**: seven scalar capabilities with threshold
//!   events
//! - **FepCore**: predictive-coding beliefs, precision-weighted surprise,
//!   softmax action selection and emoji responses
//! - **Environment**: shared weather, regions, resources and projections
//! - **SimulationModel**: roster, seeded PRNG, scheduler
//!
//! # Example
//!
//! ```
//! use companion_dynamics::agent::PetBuilder;
//! use companion_dynamics::sim::SimulationBuilder;
//! use companion_dynamics::types::UserId;
//!
//! let mut model = SimulationBuilder::new(42).build();
//! let pet_id = model
//!     .spawn_pet(
//!         PetBuilder::new()
//!             .name("Miso")
//!             .owner(UserId::new("user_1").unwrap()),
//!     )
//!     .unwrap();
//!
//! let report = model.step();
//! assert_eq!(report.agents[0].pet_id, pet_id);
//! ```
//!
//! # Determinism
//!
//! A model owns exactly one seeded PRNG; every stochastic decision in the
//! core draws from it. Equal seeds, initial agents and message schedules
//! replay bit-identically. Nothing in the core reads a wall clock or a
//! global entropy source.

pub mod agent;
pub mod boundary;
pub mod cognition;
pub mod energy;
pub mod enums;
pub mod environment;
pub mod fep;
pub mod sim;
pub mod types;

// Re-export the primary surface at the crate root.
pub use agent::{PetAgent, PetBuildError, PetBuilder};
pub use boundary::{BoundaryStatus, BoundarySystem, ExchangeSystem};
pub use cognition::CognitiveDevelopment;
pub use energy::EnergySystem;
pub use environment::Environment;
pub use fep::{EmojiTable, FepCore};
pub use sim::{
    Message, MessageBus, SemanticAdvisor, SimulationBuilder, SimulationModel, SnapshotStore,
    TickReport,
};
