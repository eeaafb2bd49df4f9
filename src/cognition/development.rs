//! Observable cognitive development.
//!
//! Seven scalar areas accumulate through experience with diminishing
//! returns. Crossing a fixed threshold upward emits a development event;
//! areas never regress.

use crate::enums::{CognitiveArea, DevelopmentStage, ExperienceKind, TraitName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed thresholds that emit development events when crossed upward.
pub const DEVELOPMENT_THRESHOLDS: [f32; 5] = [0.2, 0.4, 0.6, 0.8, 0.95];

/// Number of recent development events retained.
const RECENT_DEVELOPMENTS_CAP: usize = 20;

/// An immutable record of a cognitive area crossing a threshold upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentEvent {
    pub area: CognitiveArea,
    /// The threshold crossed.
    pub threshold: f32,
    /// The area value after crossing.
    pub value: f32,
    /// Tick of the crossing.
    pub tick: u64,
}

/// Result of processing one experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceOutcome {
    /// Development events emitted by this experience, if any.
    pub developments: Vec<DevelopmentEvent>,
    /// Overall stage after the experience.
    pub stage: DevelopmentStage,
}

/// Snapshot of the cognitive state for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveSnapshot {
    pub areas: BTreeMap<CognitiveArea, f32>,
    pub stage: DevelopmentStage,
    pub recent_developments: Vec<DevelopmentEvent>,
}

/// Tracks the seven cognitive areas and their threshold events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveDevelopment {
    areas: BTreeMap<CognitiveArea, f32>,
    /// Base learning rate per unit intensity.
    learning_rate: f32,
    recent_developments: Vec<DevelopmentEvent>,
}

impl Default for CognitiveDevelopment {
    fn default() -> Self {
        CognitiveDevelopment::new()
    }
}

impl CognitiveDevelopment {
    /// Creates a fresh system with every area at 0.1.
    #[must_use]
    pub fn new() -> Self {
        CognitiveDevelopment {
            areas: CognitiveArea::ALL.iter().map(|a| (*a, 0.1)).collect(),
            learning_rate: 0.01,
            recent_developments: Vec::new(),
        }
    }

    /// Current value of an area.
    #[must_use]
    pub fn area(&self, area: CognitiveArea) -> f32 {
        self.areas.get(&area).copied().unwrap_or(0.0)
    }

    /// All areas, keyed by name.
    #[must_use]
    pub fn areas(&self) -> &BTreeMap<CognitiveArea, f32> {
        &self.areas
    }

    /// Overwrites an area value (snapshot import, test setup). Clamped.
    pub fn set_area(&mut self, area: CognitiveArea, value: f32) {
        self.areas.insert(area, value.clamp(0.0, 1.0));
    }

    /// Mean over all areas.
    #[must_use]
    pub fn mean_level(&self) -> f32 {
        let total: f32 = self.areas.values().sum();
        total / self.areas.len() as f32
    }

    /// Current development stage.
    #[must_use]
    pub fn stage(&self) -> DevelopmentStage {
        DevelopmentStage::from_mean(self.mean_level())
    }

    /// Processes an experience, advancing the targeted areas.
    ///
    /// Per targeted area:
    /// `gain = intensity · 0.01 · weight · trait_mod · (1 − value²)`,
    /// where `trait_mod` rewards openness and curiosity. Crossing any of the
    /// fixed thresholds emits one event per threshold crossed.
    pub fn process_experience(
        &mut self,
        kind: ExperienceKind,
        intensity: f32,
        traits: &BTreeMap<TraitName, f32>,
        tick: u64,
    ) -> ExperienceOutcome {
        let intensity = intensity.clamp(0.0, 1.0);
        let base = intensity * self.learning_rate;

        let openness = traits.get(&TraitName::Openness).copied().unwrap_or(0.5);
        let curiosity = traits.get(&TraitName::Curiosity).copied().unwrap_or(0.5);
        let trait_mod = 1.0 + 0.5 * (openness - 0.5) + 0.8 * (curiosity - 0.5);

        let mut developments = Vec::new();

        for (area, weight) in kind.area_weights() {
            let old_value = self.area(*area);
            let difficulty = 1.0 - old_value * old_value;
            let new_value = (old_value + base * weight * trait_mod * difficulty).min(1.0);
            self.areas.insert(*area, new_value);

            for threshold in DEVELOPMENT_THRESHOLDS {
                if old_value < threshold && new_value >= threshold {
                    developments.push(DevelopmentEvent {
                        area: *area,
                        threshold,
                        value: new_value,
                        tick,
                    });
                }
            }
        }

        self.recent_developments.extend(developments.iter().cloned());
        let overflow = self
            .recent_developments
            .len()
            .saturating_sub(RECENT_DEVELOPMENTS_CAP);
        if overflow > 0 {
            self.recent_developments.drain(..overflow);
        }

        ExperienceOutcome {
            developments,
            stage: self.stage(),
        }
    }

    /// Snapshot for reports.
    #[must_use]
    pub fn status(&self) -> CognitiveSnapshot {
        CognitiveSnapshot {
            areas: self.areas.clone(),
            stage: self.stage(),
            recent_developments: self.recent_developments.clone(),
        }
    }
}
