//! Pet memory: episodic records, semantic patterns and counterpart files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Maximum retained episodic records.
pub const EPISODIC_CAP: usize = 100;

/// Window inspected during consolidation and trait evolution.
pub const RECENT_WINDOW: usize = 20;

/// One remembered interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicRecord {
    pub tick: u64,
    /// Who the interaction was with: user ID, session ID or pet ID.
    pub counterpart: String,
    /// Interaction kind name (`feed`, `play`, ...).
    pub kind: String,
    /// Brief content snapshot.
    pub content: String,
    /// Vital deltas attributed to the interaction.
    pub vital_deltas: BTreeMap<String, f32>,
    pub mood_before: f32,
    pub mood_after: f32,
}

/// A consolidated pattern extracted from repeated episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticPattern {
    pub counterpart: String,
    pub kind: String,
    pub frequency: u32,
    pub avg_mood_effect: f32,
    pub last_updated_tick: u64,
}

/// Aggregate file on one counterpart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CounterpartProfile {
    pub interaction_count: u64,
    pub last_seen_tick: u64,
    /// Interaction counts by kind.
    pub kind_counts: BTreeMap<String, u64>,
}

impl CounterpartProfile {
    /// The interaction kind seen most often with this counterpart.
    #[must_use]
    pub fn favourite_activity(&self) -> Option<&str> {
        self.kind_counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(kind, _)| kind.as_str())
    }
}

/// All three memory layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PetMemory {
    episodic: VecDeque<EpisodicRecord>,
    /// Patterns keyed `counterpart:kind`.
    semantic: BTreeMap<String, SemanticPattern>,
    counterparts: BTreeMap<String, CounterpartProfile>,
}

impl PetMemory {
    /// Creates empty memory.
    #[must_use]
    pub fn new() -> Self {
        PetMemory::default()
    }

    /// Records an episode, evicting the oldest past the cap, and updates
    /// the counterpart file.
    pub fn record(&mut self, record: EpisodicRecord) {
        let profile = self
            .counterparts
            .entry(record.counterpart.clone())
            .or_default();
        profile.interaction_count += 1;
        profile.last_seen_tick = record.tick;
        *profile.kind_counts.entry(record.kind.clone()).or_insert(0) += 1;

        self.episodic.push_back(record);
        if self.episodic.len() > EPISODIC_CAP {
            self.episodic.pop_front();
        }
    }

    /// All episodic records, oldest first.
    #[must_use]
    pub fn episodic(&self) -> &VecDeque<EpisodicRecord> {
        &self.episodic
    }

    /// The most recent `n` episodic records, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&EpisodicRecord> {
        let skip = self.episodic.len().saturating_sub(n);
        self.episodic.iter().skip(skip).collect()
    }

    /// Consolidated semantic patterns.
    #[must_use]
    pub fn semantic(&self) -> &BTreeMap<String, SemanticPattern> {
        &self.semantic
    }

    /// Counterpart files.
    #[must_use]
    pub fn counterparts(&self) -> &BTreeMap<String, CounterpartProfile> {
        &self.counterparts
    }

    /// Counts interaction kinds over the recent window.
    #[must_use]
    pub fn recent_kind_counts(&self) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for record in self.recent(RECENT_WINDOW) {
            *counts.entry(record.kind.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Consolidates episodic patterns into semantic memory.
    ///
    /// Groups the recent window by counterpart; any (counterpart, kind)
    /// pair occurring at least three times is recorded with its mean mood
    /// delta.
    pub fn consolidate(&mut self, tick: u64) {
        if self.episodic.len() < 10 {
            return;
        }

        let mut grouped: BTreeMap<(String, String), Vec<f32>> = BTreeMap::new();
        for record in self.recent(RECENT_WINDOW) {
            grouped
                .entry((record.counterpart.clone(), record.kind.clone()))
                .or_default()
                .push(record.mood_after - record.mood_before);
        }

        for ((counterpart, kind), deltas) in grouped {
            if deltas.len() < 3 {
                continue;
            }
            let avg = deltas.iter().sum::<f32>() / deltas.len() as f32;
            let key = format!("{}:{}", counterpart, kind);
            self.semantic.insert(
                key,
                SemanticPattern {
                    counterpart,
                    kind,
                    frequency: deltas.len() as u32,
                    avg_mood_effect: avg,
                    last_updated_tick: tick,
                },
            );
        }
    }

    /// Restores memory layers from a snapshot.
    pub(crate) fn restore(
        &mut self,
        episodic: Vec<EpisodicRecord>,
        semantic: BTreeMap<String, SemanticPattern>,
        counterparts: BTreeMap<String, CounterpartProfile>,
    ) {
        self.episodic = episodic.into_iter().take(EPISODIC_CAP).collect();
        self.semantic = semantic;
        self.counterparts = counterparts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tick: u64, counterpart: &str, kind: &str, mood_delta: f32) -> EpisodicRecord {
        EpisodicRecord {
            tick,
            counterpart: counterpart.to_string(),
            kind: kind.to_string(),
            content: String::new(),
            vital_deltas: BTreeMap::new(),
            mood_before: 50.0,
            mood_after: 50.0 + mood_delta,
        }
    }

    #[test]
    fn episodic_memory_is_capped() {
        let mut memory = PetMemory::new();
        for i in 0..(EPISODIC_CAP as u64 + 40) {
            memory.record(record(i, "user_1", "feed", 1.0));
        }
        assert_eq!(memory.episodic().len(), EPISODIC_CAP);
        // Oldest were evicted.
        assert_eq!(memory.episodic().front().unwrap().tick, 40);
    }

    #[test]
    fn counterpart_profile_tracks_favourite() {
        let mut memory = PetMemory::new();
        for i in 0..5 {
            memory.record(record(i, "user_1", "play", 2.0));
        }
        memory.record(record(6, "user_1", "feed", 1.0));

        let profile = &memory.counterparts()["user_1"];
        assert_eq!(profile.interaction_count, 6);
        assert_eq!(profile.favourite_activity(), Some("play"));
    }

    #[test]
    fn consolidation_requires_repetition() {
        let mut memory = PetMemory::new();
        for i in 0..10 {
            memory.record(record(i, "user_1", "feed", 2.0));
        }
        memory.record(record(11, "user_2", "play", 1.0));
        memory.consolidate(12);

        assert!(memory.semantic().contains_key("user_1:feed"));
        assert!(!memory.semantic().contains_key("user_2:play"));
    }

    #[test]
    fn consolidation_records_mean_mood_effect() {
        let mut memory = PetMemory::new();
        for i in 0..12 {
            memory.record(record(i, "user_1", "pet", 3.0));
        }
        memory.consolidate(13);
        let pattern = &memory.semantic()["user_1:pet"];
        assert!((pattern.avg_mood_effect - 3.0).abs() < 1e-4);
        assert_eq!(pattern.last_updated_tick, 13);
    }

    #[test]
    fn consolidation_noop_on_sparse_memory() {
        let mut memory = PetMemory::new();
        for i in 0..5 {
            memory.record(record(i, "user_1", "feed", 1.0));
        }
        memory.consolidate(6);
        assert!(memory.semantic().is_empty());
    }
}
