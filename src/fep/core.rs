//! The active-inference cognitive core.
//!
//! A pet holds a belief vector over a compressed state space, weighs
//! prediction errors by learned precision, and picks emoji responses by
//! scoring candidates against its preferences and current state. Attention
//! and thriving live here too: they are the scalars the whole engine
//! ultimately optimises for.

use crate::fep::emoji::{EmojiTable, EmotionalContext};
use crate::fep::policy::optimize_policy;
use crate::fep::response::generate_response;
use crate::sim::Advice;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Dimension of the belief, precision and prediction vectors.
pub const BELIEF_DIM: usize = 16;

/// Maximum retained surprise samples.
pub const SURPRISE_HISTORY_CAP: usize = 100;

/// Raw-surprise level above which the pet armours its boundary.
pub const SURPRISE_GUARD_THRESHOLD: f32 = 2.0;

/// Error returned when an imported FEP state is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FepStateError {
    pub reason: String,
}

impl fmt::Display for FepStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid FEP state: {}", self.reason)
    }
}

impl std::error::Error for FepStateError {}

/// Outcome of processing one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationOutcome {
    /// Precision-weighted squared prediction error, unbounded.
    pub raw_surprise: f32,
    /// Logistic squashing of the raw surprise into `(0, 1)`.
    pub surprise: f32,
    /// Overall cognitive load: total error over total precision.
    pub free_energy: f32,
}

/// Outcome of an action selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionChoice {
    pub action: usize,
    pub confidence: f32,
}

/// How to select the next action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSelection {
    /// One-step lookahead, softmax-sampled.
    Greedy,
    /// Multi-step policy optimisation over the given horizon.
    PolicyOptimization { horizon: usize },
}

/// Result of an emoji exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiOutcome {
    /// The pet's multi-emoji reply.
    pub response: String,
    pub surprise: f32,
    pub confidence: f32,
    pub attention: f32,
    pub thriving: f32,
    /// Context extracted from the incoming sequence.
    pub context: EmotionalContext,
}

/// Serializable FEP state for snapshot export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FepState {
    pub beliefs: Vec<f32>,
    pub precision: Vec<f32>,
    pub action_preferences: Vec<f32>,
    pub surprise_history: Vec<f32>,
    pub accuracy: f32,
    pub learning_rate: f32,
    pub attention: f32,
    pub thriving: f32,
    pub emoji_preferences: BTreeMap<String, f32>,
}

/// Predictive-coding belief loop plus attention/thriving bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FepCore {
    beliefs: Vec<f32>,
    precision: Vec<f32>,
    predictions: Vec<f32>,
    last_error: Vec<f32>,
    action_preferences: Vec<f32>,
    emoji_preferences: BTreeMap<String, f32>,
    surprise_history: VecDeque<f32>,
    accuracy: f32,
    learning_rate: f32,
    precision_update_rate: f32,
    exploration_rate: f32,
    attention: f32,
    thriving: f32,
    last_interaction_tick: u64,
}

impl FepCore {
    /// Creates a core with neutral beliefs and PRNG-seeded preferences.
    #[must_use]
    pub fn new(action_size: usize, rng: &mut impl Rng) -> Self {
        FepCore {
            beliefs: vec![0.5; BELIEF_DIM],
            precision: vec![1.0; BELIEF_DIM],
            predictions: vec![0.5; BELIEF_DIM],
            last_error: vec![0.0; BELIEF_DIM],
            action_preferences: (0..action_size).map(|_| rng.gen_range(0.2..0.8)).collect(),
            emoji_preferences: BTreeMap::new(),
            surprise_history: VecDeque::new(),
            accuracy: 0.5,
            learning_rate: 0.1,
            precision_update_rate: 0.05,
            exploration_rate: 0.3,
            attention: 50.0,
            thriving: 50.0,
            last_interaction_tick: 0,
        }
    }

    // --- Accessors ---

    /// Current belief vector.
    #[must_use]
    pub fn beliefs(&self) -> &[f32] {
        &self.beliefs
    }

    /// Current precision vector.
    #[must_use]
    pub fn precision(&self) -> &[f32] {
        &self.precision
    }

    /// Current action preferences.
    #[must_use]
    pub fn action_preferences(&self) -> &[f32] {
        &self.action_preferences
    }

    /// Learned per-glyph preferences.
    #[must_use]
    pub fn emoji_preferences(&self) -> &BTreeMap<String, f32> {
        &self.emoji_preferences
    }

    /// Smoothed prediction accuracy in `[0, 1]`.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    /// Current attention in `[0, 100]`.
    #[must_use]
    pub fn attention(&self) -> f32 {
        self.attention
    }

    /// Current thriving in `[0, 100]`.
    #[must_use]
    pub fn thriving(&self) -> f32 {
        self.thriving
    }

    /// Exploration rate used by policy optimisation.
    #[must_use]
    pub fn exploration_rate(&self) -> f32 {
        self.exploration_rate
    }

    /// Recent surprise values, oldest first.
    #[must_use]
    pub fn surprise_history(&self) -> Vec<f32> {
        self.surprise_history.iter().copied().collect()
    }

    /// Overwrites attention (test setup, snapshot import).
    pub fn set_attention(&mut self, attention: f32) {
        self.attention = attention.clamp(0.0, 100.0);
    }

    /// Overwrites thriving (test setup, snapshot import).
    pub fn set_thriving(&mut self, thriving: f32) {
        self.thriving = thriving.clamp(0.0, 100.0);
    }

    // --- Observation ---

    /// Processes an observation and updates beliefs and precision.
    ///
    /// Observations shorter than the belief dimension are padded with the
    /// current beliefs, contributing zero error on unobserved components.
    pub fn observe(&mut self, observation: &[f32]) -> ObservationOutcome {
        let mut obs = vec![0.0; BELIEF_DIM];
        for (i, slot) in obs.iter_mut().enumerate() {
            *slot = observation.get(i).copied().unwrap_or(self.beliefs[i]);
        }

        let mut raw_surprise = 0.0;
        for i in 0..BELIEF_DIM {
            let error = obs[i] - self.predictions[i];
            self.last_error[i] = error;
            raw_surprise += error * error * self.precision[i];
        }
        let surprise = 1.0 / (1.0 + (-raw_surprise + 2.0).exp());

        // Adaptive learning rate: learn faster when recently inaccurate.
        let adaptive_rate = self.learning_rate * (1.0 + (1.0 - self.accuracy));
        for i in 0..BELIEF_DIM {
            let belief_error = obs[i] - self.beliefs[i];
            self.beliefs[i] =
                (self.beliefs[i] + adaptive_rate * belief_error * self.precision[i]).clamp(0.0, 1.0);
            self.precision[i] = (self.precision[i]
                + self.precision_update_rate * (1.0 - self.last_error[i].abs()))
            .clamp(0.1, 2.0);
        }
        self.predictions.copy_from_slice(&self.beliefs);

        self.surprise_history.push_back(surprise);
        if self.surprise_history.len() > SURPRISE_HISTORY_CAP {
            self.surprise_history.pop_front();
        }
        self.accuracy = 0.9 * self.accuracy + 0.1 * (1.0 - surprise);

        let total_error: f32 = self.last_error.iter().map(|e| e * e).sum();
        let total_precision: f32 = self.precision.iter().sum();
        let free_energy = total_error / (total_precision + 1e-6);

        ObservationOutcome {
            raw_surprise,
            surprise,
            free_energy,
        }
    }

    // --- Attention and thriving ---

    /// Advances attention decay and the thriving response for one tick.
    ///
    /// Attention bleeds at 0.02 per simulated hour since the last
    /// interaction. Thriving grows while attention stays above 30 and decays
    /// below it.
    pub fn advance_attention(&mut self, tick: u64) {
        let hours_since = tick.saturating_sub(self.last_interaction_tick) as f32 * 0.1;
        self.attention = (self.attention - 0.02 * hours_since).max(0.0);

        if self.attention > 30.0 {
            self.thriving = (self.thriving + 0.05 * self.attention / 100.0).min(100.0);
        } else {
            self.thriving = (self.thriving - 0.01).max(0.0);
        }
    }

    /// Registers a received interaction.
    ///
    /// The boost is `10 · intensity · multiplier`, with diminishing returns
    /// above attention 80. Thriving gains half the boost, scaled again by
    /// intensity.
    pub fn receive_interaction(&mut self, multiplier: f32, intensity: f32, tick: u64) {
        let boost = 10.0 * intensity * multiplier;
        let effective = if self.attention > 80.0 {
            boost * (1.0 - (self.attention - 80.0) / 20.0)
        } else {
            boost
        };
        self.attention = (self.attention + effective.max(0.0)).min(100.0);
        self.thriving = (self.thriving + boost * 0.5 * intensity).min(100.0);
        self.last_interaction_tick = tick;
    }

    // --- Action selection ---

    /// Selects an action from the current state.
    pub fn select_action(
        &self,
        state: &[f32],
        mode: ActionSelection,
        rng: &mut impl Rng,
    ) -> ActionChoice {
        match mode {
            ActionSelection::Greedy => self.select_action_greedy(state, rng),
            ActionSelection::PolicyOptimization { horizon } => {
                optimize_policy(self, state, horizon, rng)
            }
        }
    }

    /// One-step lookahead: predict, score against beliefs, softmax-sample.
    fn select_action_greedy(&self, state: &[f32], rng: &mut impl Rng) -> ActionChoice {
        let values: Vec<f32> = (0..self.action_preferences.len())
            .map(|action| {
                let predicted = self.predict_state(state, action);
                let divergence: f32 = predicted
                    .iter()
                    .zip(&self.beliefs)
                    .map(|(p, b)| (p - b) * (p - b))
                    .sum();
                self.action_preferences[action] - divergence
            })
            .collect();

        let probs = softmax(&values);
        let action = sample_index(&probs, rng);
        ActionChoice {
            action,
            confidence: probs[action],
        }
    }

    /// The one-step predictive model shared by greedy and policy selection.
    ///
    /// `ŝ = 0.9·s + 0.1·u_a + 0.05·b` with a one-hot action effect.
    pub(crate) fn predict_state(&self, state: &[f32], action: usize) -> Vec<f32> {
        (0..BELIEF_DIM)
            .map(|i| {
                let s = state.get(i).copied().unwrap_or(0.5);
                let u = if i == action { 1.0 } else { 0.0 };
                (0.9 * s + 0.1 * u + 0.05 * self.beliefs[i]).clamp(0.0, 1.0)
            })
            .collect()
    }

    /// Expected raw surprise of a state against current beliefs.
    pub(crate) fn expected_surprise(&self, state: &[f32]) -> f32 {
        state
            .iter()
            .zip(&self.beliefs)
            .map(|(s, b)| (s - b) * (s - b))
            .sum()
    }

    // --- Emoji interaction ---

    /// Processes a user emoji sequence end to end.
    ///
    /// Parses the sequence, boosts attention, builds a reply, folds the
    /// exchange back into the belief loop and nudges emoji preferences by
    /// each received glyph's attention potential.
    pub fn process_emoji_interaction(
        &mut self,
        sequence: &str,
        table: &EmojiTable,
        advice: Option<&Advice>,
        tick: u64,
        rng: &mut impl Rng,
    ) -> EmojiOutcome {
        let emojis = table.parse(sequence);
        let context = table.emotional_context(&emojis);

        self.receive_interaction(1.0, context.attention_potential, tick);

        let response = generate_response(self, table, &context, advice, rng);

        let observation = self.interaction_observation(&context);
        let outcome = self.observe(&observation);

        for glyph in &emojis {
            if table.affect_of(glyph).is_some() {
                *self.emoji_preferences.entry(glyph.clone()).or_insert(0.0) +=
                    0.1 * context.attention_potential;
            }
        }

        EmojiOutcome {
            response,
            surprise: outcome.surprise,
            confidence: self.accuracy,
            attention: self.attention,
            thriving: self.thriving,
            context,
        }
    }

    fn interaction_observation(&self, context: &EmotionalContext) -> Vec<f32> {
        vec![
            context.joy,
            context.curiosity,
            context.contentment,
            context.attention_potential,
            self.attention / 100.0,
            self.thriving / 100.0,
            context.emoji_count as f32 / 10.0,
            context.sentiment,
        ]
    }

    // --- Adaptation ---

    /// Adapts learning parameters to environmental complexity.
    pub fn adapt_to_environment(&mut self, complexity: f32) {
        let complexity = complexity.clamp(0.0, 1.0);
        self.learning_rate = (0.1 * (1.0 + complexity)).clamp(0.01, 0.5);
        self.precision_update_rate = (0.05 * (1.0 + 0.5 * complexity)).clamp(0.01, 0.2);
    }

    // --- State transfer ---

    /// Exports the serializable state.
    #[must_use]
    pub fn export_state(&self) -> FepState {
        FepState {
            beliefs: self.beliefs.clone(),
            precision: self.precision.clone(),
            action_preferences: self.action_preferences.clone(),
            surprise_history: self.surprise_history(),
            accuracy: self.accuracy,
            learning_rate: self.learning_rate,
            attention: self.attention,
            thriving: self.thriving,
            emoji_preferences: self.emoji_preferences.clone(),
        }
    }

    /// Imports a previously exported state.
    ///
    /// # Errors
    ///
    /// Rejects vectors whose dimensions do not match this core.
    pub fn import_state(&mut self, state: FepState) -> Result<(), FepStateError> {
        if state.beliefs.len() != BELIEF_DIM {
            return Err(FepStateError {
                reason: format!(
                    "belief dimension {} does not match {}",
                    state.beliefs.len(),
                    BELIEF_DIM
                ),
            });
        }
        if state.precision.len() != BELIEF_DIM {
            return Err(FepStateError {
                reason: format!(
                    "precision dimension {} does not match {}",
                    state.precision.len(),
                    BELIEF_DIM
                ),
            });
        }
        if state.action_preferences.len() != self.action_preferences.len() {
            return Err(FepStateError {
                reason: format!(
                    "action space {} does not match {}",
                    state.action_preferences.len(),
                    self.action_preferences.len()
                ),
            });
        }

        self.beliefs = state.beliefs.iter().map(|b| b.clamp(0.0, 1.0)).collect();
        self.precision = state.precision.iter().map(|p| p.clamp(0.1, 2.0)).collect();
        self.predictions.copy_from_slice(&self.beliefs);
        self.action_preferences = state
            .action_preferences
            .iter()
            .map(|p| p.clamp(0.0, 1.0))
            .collect();
        self.surprise_history = state
            .surprise_history
            .into_iter()
            .take(SURPRISE_HISTORY_CAP)
            .collect();
        self.accuracy = state.accuracy.clamp(0.0, 1.0);
        self.learning_rate = state.learning_rate.clamp(0.01, 0.5);
        self.attention = state.attention.clamp(0.0, 100.0);
        self.thriving = state.thriving.clamp(0.0, 100.0);
        self.emoji_preferences = state.emoji_preferences;
        Ok(())
    }
}

/// Softmax with unit temperature.
pub(crate) fn softmax(values: &[f32]) -> Vec<f32> {
    let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = values.iter().map(|v| (v - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

/// Samples an index from a probability vector.
pub(crate) fn sample_index(probs: &[f32], rng: &mut impl Rng) -> usize {
    let roll: f32 = rng.gen();
    let mut cumulative = 0.0;
    for (i, p) in probs.iter().enumerate() {
        cumulative += p;
        if roll <= cumulative {
            return i;
        }
    }
    probs.len() - 1
}
