//! The simulation model: roster, environment, PRNG, scheduler.
//!
//! Single-threaded and cooperative. A tick is atomic with respect to
//! external observers: the environment advances first, the bus drains into
//! per-agent inboxes, pairwise encounters are arranged, then agents step in
//! uniformly random order. The seeded PRNG is the only source of
//! nondeterminism, so equal seeds and schedules replay bit-identically.

use crate::agent::{PetAgent, PetBuildError, PetBuilder, StepContext};
use crate::enums::TraitName;
use crate::environment::Environment;
use crate::fep::EmojiTable;
use crate::sim::cancel::CancelToken;
use crate::sim::message::{Message, MessageContent};
use crate::sim::message_bus::{InMemoryMessageBus, MessageBus};
use crate::sim::report::{EnvTickReport, TickReport};
use crate::sim::snapshot::{PetSnapshot, SnapshotError};
use crate::sim::SemanticAdvisor;
use crate::types::{PetId, Timestamp};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, VecDeque};
use tracing::warn;

/// Error returned when the simulation cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationBuildError {
    pub reason: String,
}

impl std::fmt::Display for SimulationBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot build simulation: {}", self.reason)
    }
}

impl std::error::Error for SimulationBuildError {}

/// Fluent builder for [`SimulationModel`].
///
/// # Examples
///
/// ```
/// use companion_dynamics::sim::SimulationBuilder;
///
/// let model = SimulationBuilder::new(42).build();
/// assert_eq!(model.tick(), 0);
/// ```
pub struct SimulationBuilder {
    seed: u64,
    start: Timestamp,
    advisor: Option<Box<dyn SemanticAdvisor>>,
}

impl SimulationBuilder {
    /// Creates a builder with the given PRNG seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        SimulationBuilder {
            seed,
            start: Timestamp::from_ymd_hms(2024, 1, 1, 8, 0, 0),
            advisor: None,
        }
    }

    /// Sets the simulated start time.
    #[must_use]
    pub fn start(mut self, start: Timestamp) -> Self {
        self.start = start;
        self
    }

    /// Attaches a semantic advisor.
    #[must_use]
    pub fn advisor(mut self, advisor: Box<dyn SemanticAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Builds the model.
    #[must_use]
    pub fn build(self) -> SimulationModel {
        SimulationModel {
            environment: Environment::new(),
            agents: BTreeMap::new(),
            inboxes: BTreeMap::new(),
            bus: InMemoryMessageBus::new(),
            rng: StdRng::seed_from_u64(self.seed),
            tick: 0,
            start: self.start,
            emoji_table: EmojiTable::standard(),
            advisor: self.advisor,
            cancel: CancelToken::new(),
        }
    }
}

/// Owns the agent arena, the environment, the PRNG and the tick counter.
pub struct SimulationModel {
    environment: Environment,
    agents: BTreeMap<PetId, PetAgent>,
    inboxes: BTreeMap<PetId, VecDeque<Message>>,
    bus: InMemoryMessageBus,
    rng: StdRng,
    tick: u64,
    start: Timestamp,
    emoji_table: EmojiTable,
    advisor: Option<Box<dyn SemanticAdvisor>>,
    cancel: CancelToken,
}

impl SimulationModel {
    /// Ticks completed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.start.plus_ticks(self.tick)
    }

    /// The environment.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Mutable environment access (event injection, test setup).
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// The cancellation token for this model.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// IDs of all pets in the roster, in canonical order.
    #[must_use]
    pub fn pet_ids(&self) -> Vec<PetId> {
        self.agents.keys().cloned().collect()
    }

    /// Looks up a pet.
    #[must_use]
    pub fn pet(&self, id: &PetId) -> Option<&PetAgent> {
        self.agents.get(id)
    }

    /// Mutable pet access (test setup).
    pub fn pet_mut(&mut self, id: &PetId) -> Option<&mut PetAgent> {
        self.agents.get_mut(id)
    }

    /// The emoji table shared by all pets.
    #[must_use]
    pub fn emoji_table(&self) -> &EmojiTable {
        &self.emoji_table
    }

    /// Delivers a message through the bus.
    pub fn deliver(&mut self, message: Message) -> crate::sim::DeliveryStatus {
        self.bus.deliver(message)
    }

    /// Spawns a new pet from a builder, using the model PRNG and clock.
    ///
    /// # Errors
    ///
    /// Propagates builder validation failures.
    pub fn spawn_pet(&mut self, builder: PetBuilder) -> Result<PetId, PetBuildError> {
        let now = self.now();
        let pet = builder.build(now, &mut self.rng)?;
        let id = pet.id().clone();
        self.register(pet);
        Ok(id)
    }

    /// Adds an existing pet (e.g. restored from a snapshot) to the roster.
    pub fn add_pet(&mut self, pet: PetAgent) -> PetId {
        let id = pet.id().clone();
        self.register(pet);
        id
    }

    fn register(&mut self, pet: PetAgent) {
        let id = pet.id().clone();
        let central = self
            .environment
            .region_ids()
            .into_iter()
            .find(|r| r.as_str() == "central");
        if let Some(region) = central {
            let _ = self.environment.update_pet_location(&id, &region);
        }
        self.bus.register(id.clone());
        self.inboxes.insert(id.clone(), VecDeque::new());
        self.agents.insert(id, pet);
    }

    /// Removes a pet entirely: roster, environment presence, projections,
    /// pending messages.
    pub fn remove_pet(&mut self, id: &PetId) -> Option<PetAgent> {
        let pet = self.agents.remove(id)?;
        self.environment.remove_pet(id);
        self.bus.unregister(id);
        self.inboxes.remove(id);
        Some(pet)
    }

    /// Exports a pet's snapshot blob.
    #[must_use]
    pub fn snapshot_pet(&self, id: &PetId) -> Option<PetSnapshot> {
        self.agents.get(id).map(PetAgent::export_snapshot)
    }

    /// Restores a pet from a snapshot and adds it to the roster.
    ///
    /// # Errors
    ///
    /// Propagates snapshot validation failures.
    pub fn restore_pet(&mut self, snapshot: PetSnapshot) -> Result<PetId, SnapshotError> {
        let pet = PetAgent::from_snapshot(snapshot, &mut self.rng)?;
        Ok(self.add_pet(pet))
    }

    /// Runs one tick.
    ///
    /// Environment first, then bus drain, pairwise encounters, and agent
    /// steps in shuffled order. Agents whose step fails an invariant check
    /// are quarantined for the tick and the simulation continues.
    pub fn step(&mut self) -> TickReport {
        self.tick += 1;
        let tick = self.tick;

        self.environment.step(&mut self.rng);

        // Drain external messages into per-agent inboxes.
        for id in self.pet_ids() {
            let messages = self.bus.drain(&id);
            if let Some(inbox) = self.inboxes.get_mut(&id) {
                inbox.extend(messages);
            }
        }

        self.arrange_encounters();

        // Uniformly random processing order.
        let mut order = self.pet_ids();
        order.shuffle(&mut self.rng);

        let mut agent_reports = Vec::with_capacity(order.len());
        let mut quarantined = Vec::new();
        let mut aborted = false;

        for id in order {
            if self.cancel.is_cancelled() {
                aborted = true;
                break;
            }

            let Some(mut agent) = self.agents.remove(&id) else {
                continue;
            };
            let inbox: Vec<Message> = self
                .inboxes
                .get_mut(&id)
                .map(|q| q.drain(..).collect())
                .unwrap_or_default();

            let ctx = StepContext {
                tick,
                now: self.start.plus_ticks(tick),
                emoji_table: &self.emoji_table,
                advisor: self.advisor.as_deref(),
            };

            match agent.step(&mut self.environment, inbox, &ctx, &mut self.rng) {
                Ok(report) => agent_reports.push(report),
                Err(violation) => {
                    warn!(pet = %id, %violation, "quarantining agent for this tick");
                    quarantined.push(id.clone());
                }
            }
            self.agents.insert(id, agent);
        }

        TickReport {
            environment: EnvTickReport {
                tick,
                time_of_day: self.environment.time_of_day(),
                weather: self.environment.weather(),
                ambient_energy: self.environment.ambient_energy(),
                novelty_level: self.environment.novelty_level(),
                active_events_count: self.environment.active_event_count(),
            },
            agents: agent_reports,
            quarantined,
            aborted,
        }
    }

    /// Arranges pairwise encounters between co-located pets.
    ///
    /// Each pet with enough energy has a 30% chance to approach a random
    /// neighbour; the neighbour receives a `pet_interaction` message scored
    /// by trait compatibility.
    fn arrange_encounters(&mut self) {
        let ids = self.pet_ids();
        let mut outgoing = Vec::new();

        for id in &ids {
            let Some(pet) = self.agents.get(id) else {
                continue;
            };
            if pet.energy_system().energy() < 20.0 {
                continue;
            }
            if self.rng.gen::<f32>() >= 0.3 {
                continue;
            }

            let neighbours = self.environment.neighbours_of(id);
            if neighbours.is_empty() {
                continue;
            }
            let other_id = neighbours[self.rng.gen_range(0..neighbours.len())].clone();
            let Some(other) = self.agents.get(&other_id) else {
                continue;
            };

            let compatibility = compatibility(&mut self.rng, pet, other);

            // Warm pairs play; play can teach the partner a behaviour.
            let (interaction, behavior) = if pet.relationships().pet(&other_id) > 3.0 {
                let exposed = pet.behavior_activations.keys().next().cloned();
                ("play".to_string(), exposed)
            } else {
                ("meet".to_string(), None)
            };

            outgoing.push(Message {
                sender: id.as_str().to_string(),
                recipient: other_id,
                content: MessageContent::PetInteraction {
                    compatibility,
                    interaction,
                    behavior,
                },
                timestamp_ms: self.start.plus_ticks(self.tick).as_millis(),
            });
        }

        for message in outgoing {
            if let Some(inbox) = self.inboxes.get_mut(&message.recipient) {
                inbox.push_back(message);
            }
        }
    }

}

/// Trait-similarity compatibility between two pets.
fn compatibility(rng: &mut StdRng, a: &PetAgent, b: &PetAgent) -> f32 {
    let mut compatibility = 0.5;
    let key_traits = [
        TraitName::Openness,
        TraitName::Extraversion,
        TraitName::Agreeableness,
    ];

    for name in key_traits {
        let difference = (a.traits().get(name) - b.traits().get(name)).abs();
        if difference < 0.2 {
            compatibility += 0.1;
        } else if difference > 0.5 {
            compatibility -= 0.1;
        }
    }

    compatibility += a.relationships().pet(b.id()) * 0.05;
    compatibility += rng.gen::<f32>() * 0.2 - 0.1;
    compatibility.clamp(0.0, 1.0)
}
