//! The five pet needs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A need dimension in `[0, 100]` where higher means more unmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedKind {
    Hunger,
    Thirst,
    Social,
    Play,
    Rest,
}

impl NeedKind {
    /// All needs, in canonical order.
    pub const ALL: [NeedKind; 5] = [
        NeedKind::Hunger,
        NeedKind::Thirst,
        NeedKind::Social,
        NeedKind::Play,
        NeedKind::Rest,
    ];

    /// Baseline per-tick drift applied to this need.
    #[must_use]
    pub fn drift_rate(self) -> f32 {
        match self {
            NeedKind::Hunger => 0.5,
            NeedKind::Thirst => 0.8,
            NeedKind::Social => 0.3,
            NeedKind::Play => 0.4,
            NeedKind::Rest => 0.2,
        }
    }

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NeedKind::Hunger => "hunger",
            NeedKind::Thirst => "thirst",
            NeedKind::Social => "social",
            NeedKind::Play => "play",
            NeedKind::Rest => "rest",
        }
    }
}

impl fmt::Display for NeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
