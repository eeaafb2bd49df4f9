//! Cognitive areas and the stages derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven scalar cognitive capabilities, each held in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveArea {
    PatternRecognition,
    MemoryCapacity,
    SocialIntelligence,
    ProblemSolving,
    LanguageProcessing,
    EnvironmentalAwareness,
    Creativity,
}

impl CognitiveArea {
    /// All areas, in canonical order.
    pub const ALL: [CognitiveArea; 7] = [
        CognitiveArea::PatternRecognition,
        CognitiveArea::MemoryCapacity,
        CognitiveArea::SocialIntelligence,
        CognitiveArea::ProblemSolving,
        CognitiveArea::LanguageProcessing,
        CognitiveArea::EnvironmentalAwareness,
        CognitiveArea::Creativity,
    ];

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CognitiveArea::PatternRecognition => "pattern_recognition",
            CognitiveArea::MemoryCapacity => "memory_capacity",
            CognitiveArea::SocialIntelligence => "social_intelligence",
            CognitiveArea::ProblemSolving => "problem_solving",
            CognitiveArea::LanguageProcessing => "language_processing",
            CognitiveArea::EnvironmentalAwareness => "environmental_awareness",
            CognitiveArea::Creativity => "creativity",
        }
    }
}

impl fmt::Display for CognitiveArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall cognitive stage derived from the mean over all seven areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentStage {
    Basic,
    Developing,
    Intermediate,
    Advanced,
    Exceptional,
}

impl DevelopmentStage {
    /// Derives the stage from the mean area value.
    #[must_use]
    pub fn from_mean(mean: f32) -> Self {
        if mean < 0.2 {
            DevelopmentStage::Basic
        } else if mean < 0.4 {
            DevelopmentStage::Developing
        } else if mean < 0.6 {
            DevelopmentStage::Intermediate
        } else if mean < 0.8 {
            DevelopmentStage::Advanced
        } else {
            DevelopmentStage::Exceptional
        }
    }

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DevelopmentStage::Basic => "basic",
            DevelopmentStage::Developing => "developing",
            DevelopmentStage::Intermediate => "intermediate",
            DevelopmentStage::Advanced => "advanced",
            DevelopmentStage::Exceptional => "exceptional",
        }
    }
}

impl fmt::Display for DevelopmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
