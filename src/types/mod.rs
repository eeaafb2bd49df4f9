//! Foundational value types: identifiers and simulated time.

mod ids;
mod timestamp;

pub use ids::{ElementId, IdError, PetId, ProjectionId, RegionId, SessionId, UserId};
pub use timestamp::{Timestamp, TimestampError, MINUTES_PER_TICK};
