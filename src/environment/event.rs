//! Transient environmental events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of concurrently active events.
pub const MAX_ACTIVE_EVENTS: usize = 16;

/// A transient event affecting the environment for a bounded duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    /// Event kind, e.g. `festival` or `cold_snap`.
    pub kind: String,
    /// Ticks until the event expires.
    pub remaining_ticks: u32,
    /// Named scalar parameters.
    pub params: BTreeMap<String, f32>,
}

impl ActiveEvent {
    /// Creates an event with the given duration.
    #[must_use]
    pub fn new(kind: impl Into<String>, duration_ticks: u32) -> Self {
        ActiveEvent {
            kind: kind.into(),
            remaining_ticks: duration_ticks,
            params: BTreeMap::new(),
        }
    }

    /// Adds a named parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: f32) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let event = ActiveEvent::new("festival", 10).with_param("social_boost", 0.2);
        assert_eq!(event.kind, "festival");
        assert_eq!(event.remaining_ticks, 10);
        assert!((event.params["social_boost"] - 0.2).abs() < f32::EPSILON);
    }
}
