//! Weather states and their first-order transition chain.
//!
//! Weather evolves as a Markov chain advanced once per tick by the
//! environment. Each state also carries a fixed effect pair consumed by the
//! need-drift step of the agent pipeline.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical weather state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Foggy,
    Windy,
}

/// Per-weather modifiers applied to need drift and mood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherEffects {
    /// Energetic quality of the weather; reduces rest need when positive.
    pub energy: f32,
    /// Mood pull of the weather; negative values increase social need.
    pub mood: f32,
}

impl Weather {
    /// All weather states, in canonical order.
    pub const ALL: [Weather; 6] = [
        Weather::Clear,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Stormy,
        Weather::Foggy,
        Weather::Windy,
    ];

    /// Canonical index of this state within [`Weather::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Weather::Clear => 0,
            Weather::Cloudy => 1,
            Weather::Rainy => 2,
            Weather::Stormy => 3,
            Weather::Foggy => 4,
            Weather::Windy => 5,
        }
    }

    /// Transition probabilities out of this state.
    ///
    /// Rows sum to 1; any residual probability mass stays on the current
    /// state when the cumulative roll falls through.
    #[must_use]
    pub fn transitions(self) -> &'static [(Weather, f32)] {
        match self {
            Weather::Clear => &[
                (Weather::Clear, 0.7),
                (Weather::Cloudy, 0.25),
                (Weather::Windy, 0.05),
            ],
            Weather::Cloudy => &[
                (Weather::Clear, 0.2),
                (Weather::Cloudy, 0.5),
                (Weather::Rainy, 0.25),
                (Weather::Foggy, 0.05),
            ],
            Weather::Rainy => &[
                (Weather::Cloudy, 0.3),
                (Weather::Rainy, 0.5),
                (Weather::Stormy, 0.2),
            ],
            Weather::Stormy => &[
                (Weather::Rainy, 0.3),
                (Weather::Stormy, 0.5),
                (Weather::Cloudy, 0.2),
            ],
            Weather::Foggy => &[
                (Weather::Foggy, 0.6),
                (Weather::Cloudy, 0.3),
                (Weather::Clear, 0.1),
            ],
            Weather::Windy => &[
                (Weather::Windy, 0.5),
                (Weather::Clear, 0.3),
                (Weather::Cloudy, 0.2),
            ],
        }
    }

    /// Samples the next weather state from the transition chain.
    #[must_use]
    pub fn step(self, rng: &mut impl Rng) -> Weather {
        let roll: f32 = rng.gen();
        let mut cumulative = 0.0;
        for &(next, prob) in self.transitions() {
            cumulative += prob;
            if roll <= cumulative {
                return next;
            }
        }
        self
    }

    /// Fixed effect pair for this weather state.
    #[must_use]
    pub fn effects(self) -> WeatherEffects {
        match self {
            Weather::Clear => WeatherEffects {
                energy: 0.2,
                mood: 0.2,
            },
            Weather::Cloudy => WeatherEffects {
                energy: 0.0,
                mood: -0.1,
            },
            Weather::Rainy => WeatherEffects {
                energy: -0.1,
                mood: -0.1,
            },
            Weather::Stormy => WeatherEffects {
                energy: -0.2,
                mood: -0.2,
            },
            Weather::Foggy => WeatherEffects {
                energy: -0.1,
                mood: 0.0,
            },
            Weather::Windy => WeatherEffects {
                energy: 0.1,
                mood: 0.1,
            },
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
            Weather::Stormy => "stormy",
            Weather::Foggy => "foggy",
            Weather::Windy => "windy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
