//! The pet agent and its internal state.
//!
//! # Key Types
//!
//! - [`PetAgent`] - composition root running the per-tick pipeline
//! - [`PetBuilder`] - fluent builder with identity validation
//! - [`TraitProfile`] - personality values plus the coupling graph
//! - [`PetMemory`] - episodic, semantic and counterpart memory layers

mod behavior;
mod interaction;
mod memory;
mod needs;
mod pet_agent;
mod relationships;
mod traits;
mod vitals;

pub use behavior::ActiveBehavior;
pub use memory::{
    CounterpartProfile, EpisodicRecord, PetMemory, SemanticPattern, EPISODIC_CAP, RECENT_WINDOW,
};
pub use needs::Needs;
pub use pet_agent::{PetAgent, PetBuildError, PetBuilder, StepContext, DEFAULT_ACTION_SPACE};
pub use relationships::{RelationshipLedger, RELATIONSHIP_BOUND};
pub use traits::TraitProfile;
pub use vitals::Vitals;
