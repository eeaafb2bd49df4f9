//! Pet vitals: health, energy and mood.

use serde::{Deserialize, Serialize};

/// The three vitals, each held in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub energy: f32,
    pub mood: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Vitals::new()
    }
}

impl Vitals {
    /// Fresh pets start healthy, charged and neutral.
    #[must_use]
    pub fn new() -> Self {
        Vitals {
            health: 100.0,
            energy: 100.0,
            mood: 50.0,
        }
    }

    /// Nudges mood, clamped.
    pub fn adjust_mood(&mut self, delta: f32) {
        self.mood = (self.mood + delta).clamp(0.0, 100.0);
    }

    /// Nudges health, clamped.
    pub fn adjust_health(&mut self, delta: f32) {
        self.health = (self.health + delta).clamp(0.0, 100.0);
    }

    /// Nudges energy, clamped.
    pub fn adjust_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, 100.0);
    }

    /// Overwrites energy (synced from the energy system each tick).
    pub fn set_energy(&mut self, energy: f32) {
        self.energy = energy.clamp(0.0, 100.0);
    }

    /// True when every vital is inside `[0, 100]`.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        let ok = |v: f32| (0.0..=100.0).contains(&v) && v.is_finite();
        ok(self.health) && ok(self.energy) && ok(self.mood)
    }
}
