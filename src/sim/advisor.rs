//! Optional semantic advisor interface.
//!
//! The advisor is advisory only: the core produces a complete response
//! without it, and any advice merely re-weights the FEP response scorer.
//! Advisor failure is treated as absence of advice.

use crate::types::PetId;
use serde::{Deserialize, Serialize};

/// Context handed to the advisor for one emoji exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptContext {
    pub pet_id: PetId,
    /// The raw incoming emoji sequence.
    pub sequence: String,
    pub attention: f32,
    pub thriving: f32,
    pub mood: f32,
}

/// Advisory re-weighting of response candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    /// Candidate response emojis to favour.
    pub preferred_response_emojis: Vec<String>,
    /// Advisor confidence in `[0, 1]`; scales the score bonus.
    pub confidence: f32,
    pub reasoning: Option<String>,
}

/// An external semantic model consulted between ticks.
pub trait SemanticAdvisor {
    /// Returns advice for the exchange, or `None` on failure or abstention.
    fn advise(&self, context: &PromptContext) -> Option<Advice>;
}
