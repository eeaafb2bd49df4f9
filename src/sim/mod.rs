//! Simulation scheduling, transport and persistence interfaces.

mod advisor;
mod cancel;
mod error;
mod message;
mod message_bus;
mod model;
mod report;
mod snapshot;

pub use advisor::{Advice, PromptContext, SemanticAdvisor};
pub use cancel::CancelToken;
pub use error::InvariantViolation;
pub use message::{FoodKind, Message, MessageContent, PettingSpot};
pub use message_bus::{DeliveryStatus, InMemoryMessageBus, MessageBus};
pub use model::{SimulationBuildError, SimulationBuilder, SimulationModel};
pub use report::{AgentTickReport, EnvTickReport, TickReport};
pub use snapshot::{
    BoundaryBlob, InMemorySnapshotStore, PetSnapshot, SnapshotError, SnapshotStore,
    SNAPSHOT_VERSION,
};
