//! The nine recognised personality traits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named personality trait held in `[0, 1]`.
///
/// The first five follow the classic five-factor dimensions; the remaining
/// four are companion-specific colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitName {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
    Curiosity,
    Playfulness,
    Affection,
    Stubbornness,
}

impl TraitName {
    /// All traits, in canonical order.
    pub const ALL: [TraitName; 9] = [
        TraitName::Openness,
        TraitName::Conscientiousness,
        TraitName::Extraversion,
        TraitName::Agreeableness,
        TraitName::Neuroticism,
        TraitName::Curiosity,
        TraitName::Playfulness,
        TraitName::Affection,
        TraitName::Stubbornness,
    ];

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TraitName::Openness => "openness",
            TraitName::Conscientiousness => "conscientiousness",
            TraitName::Extraversion => "extraversion",
            TraitName::Agreeableness => "agreeableness",
            TraitName::Neuroticism => "neuroticism",
            TraitName::Curiosity => "curiosity",
            TraitName::Playfulness => "playfulness",
            TraitName::Affection => "affection",
            TraitName::Stubbornness => "stubbornness",
        }
    }
}

impl fmt::Display for TraitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
