//! Experience kinds fed into cognitive development.

use crate::enums::CognitiveArea;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of experience a pet can process.
///
/// Each kind maps to a weighted subset of cognitive areas; kinds without a
/// dedicated mapping fall back to a small generic spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    Play,
    SocialInteraction,
    Exploration,
    Learning,
    Observation,
    BoundaryChallenge,
    Assimilation,
    Generic,
}

impl ExperienceKind {
    /// The cognitive areas this experience develops, with their weights.
    #[must_use]
    pub fn area_weights(self) -> &'static [(CognitiveArea, f32)] {
        use CognitiveArea::*;
        match self {
            ExperienceKind::Play => &[
                (PatternRecognition, 0.7),
                (ProblemSolving, 0.5),
                (Creativity, 0.8),
            ],
            ExperienceKind::SocialInteraction => &[
                (SocialIntelligence, 0.9),
                (LanguageProcessing, 0.6),
                (MemoryCapacity, 0.3),
            ],
            ExperienceKind::Exploration => &[
                (EnvironmentalAwareness, 0.8),
                (PatternRecognition, 0.5),
                (ProblemSolving, 0.4),
            ],
            ExperienceKind::Learning => &[
                (LanguageProcessing, 0.7),
                (MemoryCapacity, 0.6),
                (ProblemSolving, 0.5),
            ],
            ExperienceKind::Observation => &[
                (PatternRecognition, 0.6),
                (EnvironmentalAwareness, 0.7),
                (SocialIntelligence, 0.3),
            ],
            ExperienceKind::BoundaryChallenge => &[
                (EnvironmentalAwareness, 0.8),
                (PatternRecognition, 0.4),
                (ProblemSolving, 0.6),
            ],
            ExperienceKind::Assimilation => &[
                (MemoryCapacity, 0.7),
                (PatternRecognition, 0.5),
                (Creativity, 0.4),
            ],
            ExperienceKind::Generic => &[
                (PatternRecognition, 0.3),
                (MemoryCapacity, 0.3),
                (ProblemSolving, 0.3),
            ],
        }
    }

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceKind::Play => "play",
            ExperienceKind::SocialInteraction => "social_interaction",
            ExperienceKind::Exploration => "exploration",
            ExperienceKind::Learning => "learning",
            ExperienceKind::Observation => "observation",
            ExperienceKind::BoundaryChallenge => "boundary_challenge",
            ExperienceKind::Assimilation => "assimilation",
            ExperienceKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ExperienceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
