//! Observable cognitive development.

mod development;

pub use development::{
    CognitiveDevelopment, CognitiveSnapshot, DevelopmentEvent, ExperienceOutcome,
    DEVELOPMENT_THRESHOLDS,
};
