//! Kinds of exchangeable environmental elements and projections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of environmental element eligible for assimilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Feature,
    Resource,
    PetProjection,
    AmbientEnergy,
}

impl ElementKind {
    /// Default assimilation difficulty for this element kind.
    #[must_use]
    pub fn default_difficulty(self) -> f32 {
        match self {
            ElementKind::Feature => 0.6,
            ElementKind::Resource => 0.3,
            ElementKind::PetProjection => 0.7,
            ElementKind::AmbientEnergy => 0.2,
        }
    }

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Feature => "feature",
            ElementKind::Resource => "resource",
            ElementKind::PetProjection => "pet_projection",
            ElementKind::AmbientEnergy => "ambient_energy",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of projection a pet can place into the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    TerritorialMarker,
    SocialSignal,
    KnowledgeShare,
}

impl ProjectionKind {
    /// All projection kinds, in canonical order.
    pub const ALL: [ProjectionKind; 3] = [
        ProjectionKind::TerritorialMarker,
        ProjectionKind::SocialSignal,
        ProjectionKind::KnowledgeShare,
    ];

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionKind::TerritorialMarker => "territorial_marker",
            ProjectionKind::SocialSignal => "social_signal",
            ProjectionKind::KnowledgeShare => "knowledge_share",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_are_hardest_discrete_targets() {
        assert!(
            ElementKind::PetProjection.default_difficulty()
                > ElementKind::Feature.default_difficulty()
        );
        assert!(
            ElementKind::Feature.default_difficulty()
                > ElementKind::Resource.default_difficulty()
        );
    }
}
