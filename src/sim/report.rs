//! Tick report schemas.
//!
//! Reports are the stable observable surface of the simulation: one record
//! per agent per tick plus one for the environment. Fields are only ever
//! added in backward-compatible ways.

use crate::agent::{Needs, Vitals};
use crate::boundary::BoundarySnapshot;
use crate::cognition::CognitiveSnapshot;
use crate::enums::Weather;
use crate::types::PetId;
use serde::{Deserialize, Serialize};

/// Per-agent record for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTickReport {
    pub tick: u64,
    pub pet_id: PetId,
    pub vitals: Vitals,
    pub needs: Needs,
    pub boundary: BoundarySnapshot,
    /// Whether boundary maintenance was underfunded this tick.
    pub boundary_failing: bool,
    pub cognitive: CognitiveSnapshot,
    pub active_behaviors: Vec<String>,
    pub surprise: f32,
    pub attention: f32,
    pub thriving: f32,
    /// Emoji replies produced while draining the inbox.
    pub emoji_responses: Vec<String>,
}

/// Per-environment record for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvTickReport {
    pub tick: u64,
    pub time_of_day: f32,
    pub weather: Weather,
    pub ambient_energy: f32,
    pub novelty_level: f32,
    pub active_events_count: usize,
}

/// Everything observable about one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub environment: EnvTickReport,
    /// Agent reports in this tick's (randomised) processing order.
    pub agents: Vec<AgentTickReport>,
    /// Pets whose step aborted on an invariant violation this tick.
    pub quarantined: Vec<PetId>,
    /// True when the tick was abandoned by a cancellation signal.
    pub aborted: bool,
}
