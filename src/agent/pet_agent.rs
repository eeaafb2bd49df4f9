//! The pet agent: composition root of the per-pet subsystems.
//!
//! A `PetAgent` owns its energy economy (and through it the boundary and
//! exchange systems), its cognitive development, its FEP core, and its
//! memories, relationships, traits, vitals and needs. Its only externally
//! visible operation is [`PetAgent::step`].

use crate::agent::behavior::ActiveBehavior;
use crate::agent::memory::{EpisodicRecord, PetMemory};
use crate::agent::needs::Needs;
use crate::agent::relationships::RelationshipLedger;
use crate::agent::traits::TraitProfile;
use crate::agent::vitals::Vitals;
use crate::boundary::ElementDescriptor;
use crate::cognition::CognitiveDevelopment;
use crate::energy::EnergySystem;
use crate::enums::{
    CognitiveArea, ElementKind, ExperienceKind, LifeStage, NeedKind, ProjectionKind, TraitName,
};
use crate::environment::{EnvView, Environment};
use crate::fep::{EmojiTable, FepCore, SURPRISE_GUARD_THRESHOLD};
use crate::sim::{AgentTickReport, InvariantViolation, Message, SemanticAdvisor};
use crate::types::{PetId, SessionId, Timestamp, UserId};
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

/// FEP action-space size matching the standard emoji response vocabulary.
pub const DEFAULT_ACTION_SPACE: usize = 12;

/// Simulated days added per tick.
const AGE_PER_TICK: f32 = 1.0 / 240.0;

/// Error returned when a pet cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetBuildError {
    /// Neither an owner nor a session was provided.
    MissingIdentity,
    /// Both an owner and a session were provided.
    ConflictingIdentity,
}

impl fmt::Display for PetBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetBuildError::MissingIdentity => {
                write!(f, "a pet needs exactly one of owner or session")
            }
            PetBuildError::ConflictingIdentity => {
                write!(f, "a pet cannot have both an owner and a session")
            }
        }
    }
}

impl std::error::Error for PetBuildError {}

/// Per-step context shared by the model.
pub struct StepContext<'a> {
    pub tick: u64,
    pub now: Timestamp,
    pub emoji_table: &'a EmojiTable,
    pub advisor: Option<&'a dyn SemanticAdvisor>,
}

/// An autonomous pet agent.
#[derive(Debug, Clone)]
pub struct PetAgent {
    pub(crate) id: PetId,
    pub(crate) name: String,
    pub(crate) owner: Option<UserId>,
    pub(crate) session: Option<SessionId>,
    pub(crate) created_at: Timestamp,
    pub(crate) last_interaction: Timestamp,
    pub(crate) age_days: f32,
    pub(crate) traits: TraitProfile,
    pub(crate) vitals: Vitals,
    pub(crate) needs: Needs,
    pub(crate) memory: PetMemory,
    pub(crate) relationships: RelationshipLedger,
    pub(crate) energy: EnergySystem,
    pub(crate) cognition: CognitiveDevelopment,
    pub(crate) fep: FepCore,
    /// Trained and mimicked behaviours with their activation chances.
    pub(crate) behavior_activations: BTreeMap<String, f32>,
}

/// Fluent builder for [`PetAgent`].
///
/// # Examples
///
/// ```
/// use companion_dynamics::agent::PetBuilder;
/// use companion_dynamics::types::{Timestamp, UserId};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let pet = PetBuilder::new()
///     .name("Miso")
///     .owner(UserId::new("user_1").unwrap())
///     .build(Timestamp::from_ymd_hms(2024, 1, 1, 8, 0, 0), &mut rng)
///     .unwrap();
/// assert_eq!(pet.name(), "Miso");
/// ```
#[derive(Debug, Default)]
pub struct PetBuilder {
    id: Option<PetId>,
    name: Option<String>,
    owner: Option<UserId>,
    session: Option<SessionId>,
    traits: Option<BTreeMap<TraitName, f32>>,
}

impl PetBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        PetBuilder::default()
    }

    /// Sets an explicit pet ID (generated from the PRNG otherwise).
    #[must_use]
    pub fn id(mut self, id: PetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Binds the pet to an authenticated owner.
    #[must_use]
    pub fn owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Binds the pet to an anonymous session.
    #[must_use]
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Overrides the sampled starting traits.
    #[must_use]
    pub fn traits(mut self, traits: BTreeMap<TraitName, f32>) -> Self {
        self.traits = Some(traits);
        self
    }

    /// Builds the pet.
    ///
    /// # Errors
    ///
    /// Exactly one of owner or session must be set.
    pub fn build(
        self,
        created_at: Timestamp,
        rng: &mut impl Rng,
    ) -> Result<PetAgent, PetBuildError> {
        match (&self.owner, &self.session) {
            (None, None) => return Err(PetBuildError::MissingIdentity),
            (Some(_), Some(_)) => return Err(PetBuildError::ConflictingIdentity),
            _ => {}
        }

        let id = self.id.unwrap_or_else(|| PetId::generate(rng));
        let traits = match self.traits {
            Some(values) => {
                let generated = TraitProfile::generate(rng);
                TraitProfile::from_parts(values, generated.connections().clone())
            }
            None => TraitProfile::generate(rng),
        };

        Ok(PetAgent {
            name: self.name.unwrap_or_else(|| id.as_str().to_string()),
            id: id.clone(),
            owner: self.owner,
            session: self.session,
            created_at,
            last_interaction: created_at,
            age_days: 0.0,
            traits,
            vitals: Vitals::new(),
            needs: Needs::new(),
            memory: PetMemory::new(),
            relationships: RelationshipLedger::new(),
            energy: EnergySystem::new(id, 100.0),
            cognition: CognitiveDevelopment::new(),
            fep: FepCore::new(DEFAULT_ACTION_SPACE, rng),
            behavior_activations: BTreeMap::new(),
        })
    }
}

impl PetAgent {
    // --- Identity and accessors ---

    /// The pet's unique ID.
    #[must_use]
    pub fn id(&self) -> &PetId {
        &self.id
    }

    /// The pet's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The authenticated owner, if bound.
    #[must_use]
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// The anonymous session, if bound.
    #[must_use]
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// Age in simulated days.
    #[must_use]
    pub fn age_days(&self) -> f32 {
        self.age_days
    }

    /// Life stage derived from age.
    #[must_use]
    pub fn life_stage(&self) -> LifeStage {
        LifeStage::from_age(self.age_days)
    }

    /// Current vitals.
    #[must_use]
    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    /// Current needs.
    #[must_use]
    pub fn needs(&self) -> Needs {
        self.needs
    }

    /// The trait profile.
    #[must_use]
    pub fn traits(&self) -> &TraitProfile {
        &self.traits
    }

    /// The relationship ledger.
    #[must_use]
    pub fn relationships(&self) -> &RelationshipLedger {
        &self.relationships
    }

    /// The memory layers.
    #[must_use]
    pub fn memory(&self) -> &PetMemory {
        &self.memory
    }

    /// The energy system.
    #[must_use]
    pub fn energy_system(&self) -> &EnergySystem {
        &self.energy
    }

    /// The cognitive development system.
    #[must_use]
    pub fn cognition(&self) -> &CognitiveDevelopment {
        &self.cognition
    }

    /// The FEP core.
    #[must_use]
    pub fn fep(&self) -> &FepCore {
        &self.fep
    }

    /// Mutable FEP access (test setup, snapshot import).
    pub fn fep_mut(&mut self) -> &mut FepCore {
        &mut self.fep
    }

    /// Mutable energy access (test setup, snapshot import).
    pub fn energy_system_mut(&mut self) -> &mut EnergySystem {
        &mut self.energy
    }

    /// Mutable vitals access (test setup).
    pub fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    /// Mutable needs access (test setup).
    pub fn needs_mut(&mut self) -> &mut Needs {
        &mut self.needs
    }

    /// Mutable cognition access (test setup).
    pub fn cognition_mut(&mut self) -> &mut CognitiveDevelopment {
        &mut self.cognition
    }

    /// Migrates an anonymous pet to an authenticated owner.
    ///
    /// Setting the owner and clearing the session is the only permitted
    /// ownership transition.
    pub fn migrate_to_owner(&mut self, owner: UserId) {
        self.owner = Some(owner);
        self.session = None;
    }

    // --- The per-tick pipeline ---

    /// Runs one tick of the agent pipeline.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantViolation`] if any bound check fails after the
    /// pipeline's clamps; the model quarantines the agent for the tick.
    pub fn step(
        &mut self,
        env: &mut Environment,
        inbox: Vec<Message>,
        ctx: &StepContext<'_>,
        rng: &mut impl Rng,
    ) -> Result<AgentTickReport, InvariantViolation> {
        let tick = ctx.tick;

        // 1. Age and stage.
        self.age_days += AGE_PER_TICK;

        // 2. Inbox drain, FIFO.
        let mut emoji_responses = Vec::new();
        let had_messages = !inbox.is_empty();
        for message in &inbox {
            if let Some(response) =
                self.handle_message(message, ctx.emoji_table, ctx.advisor, tick, rng)
            {
                emoji_responses.push(response);
            }
        }
        if had_messages {
            self.last_interaction = ctx.now;
        }

        // 3. Sense the environment.
        let view = env.get_pet_view(&self.id, self.energy.boundary().permeability(), rng);

        // 4. Energy cycle; vitals mirror the pool.
        let energy_report = self.energy.step(&view, env, tick, rng);
        self.vitals.set_energy(self.energy.energy());

        // 5. Need drift.
        self.needs.drift(&view);

        // 6. FEP observation; surprise armours the boundary.
        self.fep.advance_attention(tick);
        let observation = self.encode_observation(&view);
        let outcome = self.fep.observe(&observation);
        if outcome.raw_surprise > SURPRISE_GUARD_THRESHOLD {
            self.energy
                .boundary_mut()
                .adjust_permeability(-0.02 * outcome.raw_surprise, 0.2);
        }

        // 7. Vitals update.
        let avg_need = self.needs.mean();
        self.vitals.adjust_mood(1.0 - 0.02 * avg_need);
        self.vitals.adjust_health(0.5 - 0.01 * avg_need);
        if self.energy.boundary_is_failing(&energy_report) {
            self.vitals.adjust_mood(-1.0);
            self.vitals.adjust_health(-1.0);
        }
        let element_effects = self.energy.assimilated_elements_effects();
        if let Some(bonus) = element_effects.get("energy") {
            self.energy.add_energy(*bonus, "assimilated_elements");
            self.vitals.set_energy(self.energy.energy());
        }
        if let Some(bonus) = element_effects.get("health") {
            self.vitals.adjust_health(*bonus);
        }
        if let Some(bonus) = element_effects.get("mood") {
            self.vitals.adjust_mood(*bonus);
        }

        // 8. Environmental interaction.
        if rng.gen::<f32>() < 0.3 {
            self.try_assimilation(&view, tick, rng);
        }
        if rng.gen::<f32>() < 0.2 {
            self.try_projection(&view, env, tick, rng);
        }
        if rng.gen::<f32>() < 0.1 {
            self.consider_region_change(&view, env, tick, rng);
        }

        // 9. Behaviour generation and execution.
        let behaviors = self.generate_behaviors(&view, rng);
        self.perform_behaviors(&behaviors, env, tick);
        self.vitals.set_energy(self.energy.energy());

        // 10. Cognitive update.
        self.update_cognition(&behaviors, &view, tick);

        // 11. Trait evolution, every tenth tick.
        if tick % 10 == 0 && tick > 0 {
            self.evolve_traits(rng);
        }

        // 12. Memory consolidation.
        self.memory.consolidate(tick);

        self.check_invariants()?;

        Ok(AgentTickReport {
            tick,
            pet_id: self.id.clone(),
            vitals: self.vitals,
            needs: self.needs,
            boundary: self.energy.boundary_snapshot(),
            boundary_failing: self.energy.boundary_is_failing(&energy_report),
            cognitive: self.cognition.status(),
            active_behaviors: behaviors.iter().map(|b| b.kind.name()).collect(),
            surprise: outcome.surprise,
            attention: self.fep.attention(),
            thriving: self.fep.thriving(),
            emoji_responses,
        })
    }

    /// Encodes the sensed environment into an observation vector.
    ///
    /// The first components carry normalised weather, time bucket, dominant
    /// need, energy and mood buckets plus ambient scalars; one extra
    /// component one-hot-marks the combined situation index.
    fn encode_observation(&self, view: &EnvView) -> Vec<f32> {
        let weather_index = view.weather.index();
        let time_bucket = match view.time_of_day {
            h if !(6.0..22.0).contains(&h) => 0usize,
            h if h < 12.0 => 1,
            h if h < 18.0 => 2,
            _ => 3,
        };
        let need_index = NeedKind::ALL
            .iter()
            .position(|k| *k == self.needs.dominant())
            .unwrap_or(0);
        let energy_bucket = (self.vitals.energy / 34.0).floor().min(2.0) as usize;
        let mood_bucket = (self.vitals.mood / 34.0).floor().min(2.0) as usize;

        let mut observation = vec![0.0; crate::fep::BELIEF_DIM];
        observation[0] = weather_index as f32 / 5.0;
        observation[1] = time_bucket as f32 / 3.0;
        observation[2] = need_index as f32 / 4.0;
        observation[3] = energy_bucket as f32 / 2.0;
        observation[4] = mood_bucket as f32 / 2.0;
        observation[5] = view.ambient_energy.clamp(0.0, 1.0);
        observation[6] = view.social_atmosphere.unwrap_or(0.5);
        observation[7] = view.novelty_level.unwrap_or(0.5);

        let situation =
            weather_index + 6 * time_bucket + 24 * need_index + 120 * energy_bucket;
        observation[8 + situation % 8] = 1.0;
        observation
    }

    // --- Environmental interaction ---

    fn try_assimilation(&mut self, view: &EnvView, tick: u64, rng: &mut impl Rng) {
        let elements = self
            .energy
            .exchange()
            .scan_environment(view, self.traits.values());
        let Some(element) = self.choose_assimilation_target(&elements, rng) else {
            return;
        };

        let result = self.energy.try_assimilate(&element, tick, rng);
        if result.outcome.is_success() {
            self.cognition.process_experience(
                ExperienceKind::Assimilation,
                0.7,
                self.traits.values(),
                tick,
            );
            self.memory.record(EpisodicRecord {
                tick,
                counterpart: "environment".to_string(),
                kind: "assimilation".to_string(),
                content: element.kind().to_string(),
                vital_deltas: BTreeMap::new(),
                mood_before: self.vitals.mood,
                mood_after: self.vitals.mood,
            });
        }
    }

    /// Weighted choice over scanned elements, biased by traits.
    fn choose_assimilation_target(
        &self,
        elements: &[ElementDescriptor],
        rng: &mut impl Rng,
    ) -> Option<ElementDescriptor> {
        if elements.is_empty() {
            return None;
        }

        let openness = self.traits.get(TraitName::Openness);
        let social_intelligence = self.cognition.area(CognitiveArea::SocialIntelligence);

        let weights: Vec<f32> = elements
            .iter()
            .map(|element| {
                let mut weight = 1.0 - element.difficulty * 0.8;
                match element.kind() {
                    ElementKind::Resource => weight *= 1.0 + (openness - 0.5),
                    ElementKind::PetProjection => weight *= 1.0 + social_intelligence,
                    _ => {}
                }
                weight.max(0.01)
            })
            .collect();

        let total: f32 = weights.iter().sum();
        let roll = rng.gen::<f32>() * total;
        let mut cumulative = 0.0;
        for (element, weight) in elements.iter().zip(&weights) {
            cumulative += weight;
            if roll <= cumulative {
                return Some(element.clone());
            }
        }
        elements.first().cloned()
    }

    fn try_projection(&mut self, view: &EnvView, env: &mut Environment, tick: u64, rng: &mut impl Rng) {
        let kind = self.choose_projection_kind(rng);
        let properties = self.projection_properties(kind);
        let trait_sample = self.traits.sample_for_projection(rng);
        let region = view.current_region.clone();

        let (exchange, boundary) = self.energy.exchange_and_boundary_mut();
        let result = exchange.project_to_environment(
            kind,
            properties,
            trait_sample,
            region,
            boundary,
            env,
            tick,
        );

        if result.is_ok() {
            self.cognition.process_experience(
                ExperienceKind::BoundaryChallenge,
                0.6,
                self.traits.values(),
                tick,
            );
            self.memory.record(EpisodicRecord {
                tick,
                counterpart: "environment".to_string(),
                kind: "projection".to_string(),
                content: kind.as_str().to_string(),
                vital_deltas: BTreeMap::new(),
                mood_before: self.vitals.mood,
                mood_after: self.vitals.mood,
            });
        }
    }

    fn choose_projection_kind(&self, rng: &mut impl Rng) -> ProjectionKind {
        let weights = [
            (
                ProjectionKind::SocialSignal,
                0.4 + self.traits.get(TraitName::Extraversion) * 0.6,
            ),
            (
                ProjectionKind::KnowledgeShare,
                0.3 + self.traits.get(TraitName::Conscientiousness) * 0.7,
            ),
            (
                ProjectionKind::TerritorialMarker,
                0.3 + self.traits.get(TraitName::Neuroticism) * 0.6,
            ),
        ];
        let total: f32 = weights.iter().map(|(_, w)| w).sum();
        let roll = rng.gen::<f32>() * total;
        let mut cumulative = 0.0;
        for (kind, weight) in weights {
            cumulative += weight;
            if roll <= cumulative {
                return kind;
            }
        }
        ProjectionKind::SocialSignal
    }

    fn projection_properties(&self, kind: ProjectionKind) -> BTreeMap<String, f32> {
        let mut properties = BTreeMap::new();
        match kind {
            ProjectionKind::TerritorialMarker => {
                properties.insert("strength".to_string(), self.vitals.energy / 100.0 * 0.7);
                properties.insert(
                    "duration".to_string(),
                    5.0 + (self.vitals.energy / 20.0).floor(),
                );
            }
            ProjectionKind::SocialSignal => {
                properties.insert("intensity".to_string(), self.vitals.mood / 100.0 * 0.8);
                properties.insert(
                    "tone".to_string(),
                    if self.vitals.mood > 50.0 { 1.0 } else { 0.0 },
                );
                properties.insert(
                    "duration".to_string(),
                    3.0 + (self.vitals.mood / 25.0).floor(),
                );
            }
            ProjectionKind::KnowledgeShare => {
                let quality = self.cognition.area(CognitiveArea::PatternRecognition);
                properties.insert("quality".to_string(), quality);
                properties.insert("duration".to_string(), 4.0 + (quality * 10.0).floor());
            }
        }
        properties
    }

    fn consider_region_change(
        &mut self,
        view: &EnvView,
        env: &mut Environment,
        tick: u64,
        rng: &mut impl Rng,
    ) {
        let mut candidates = if view.regions.is_empty() {
            env.region_ids()
        } else {
            view.region_ids()
        };
        let current = view.current_region.clone();
        candidates.retain(|r| r != &current);
        if candidates.is_empty() {
            return;
        }

        let find = |name: &str| candidates.iter().find(|r| r.as_str() == name).cloned();

        let chosen = if self.needs.hunger > 60.0 || self.needs.thirst > 60.0 {
            find("central")
        } else if self.needs.rest > 70.0 {
            find("quiet")
        } else if self.needs.play > 60.0 {
            find("play")
        } else if self.needs.social > 60.0 {
            candidates
                .iter()
                .find(|r| {
                    view.regions
                        .get(*r)
                        .map(|region| !region.current_pets.is_empty())
                        .unwrap_or(false)
                })
                .cloned()
        } else {
            None
        };

        let destination =
            chosen.unwrap_or_else(|| candidates[rng.gen_range(0..candidates.len())].clone());

        if env.update_pet_location(&self.id, &destination).is_ok() {
            self.memory.record(EpisodicRecord {
                tick,
                counterpart: "environment".to_string(),
                kind: "region_change".to_string(),
                content: format!("{} -> {}", current, destination),
                vital_deltas: BTreeMap::new(),
                mood_before: self.vitals.mood,
                mood_after: self.vitals.mood,
            });
        }
    }

    // --- Cognition and trait evolution ---

    fn update_cognition(&mut self, behaviors: &[ActiveBehavior], view: &EnvView, tick: u64) {
        if let Some(dominant) = behaviors.first() {
            if let Some(kind) = dominant.kind.experience_kind() {
                self.cognition.process_experience(
                    kind,
                    0.6 + dominant.intensity * 0.4,
                    self.traits.values(),
                    tick,
                );
            }
        }

        // Passive observation always happens; an open boundary sees more.
        let permeability = self.energy.boundary().permeability();
        self.cognition.process_experience(
            ExperienceKind::Observation,
            0.3 + permeability * 0.5,
            self.traits.values(),
            tick,
        );

        if let Some(novelty) = view.novelty_level {
            self.fep.adapt_to_environment(novelty);
        }
    }

    fn evolve_traits(&mut self, rng: &mut impl Rng) {
        if self.memory.episodic().len() < 5 {
            return;
        }

        let counts = self.memory.recent_kind_counts();
        let count = |kind: &str| counts.get(kind).copied().unwrap_or(0);

        if count("play") > 8 {
            self.traits.adjust(TraitName::Extraversion, 0.02);
            self.traits.adjust(TraitName::Playfulness, 0.03);
        }
        if count("feed") > 10 {
            self.traits.adjust(TraitName::Agreeableness, 0.01);
        }
        if count("train") > 5 {
            self.traits.adjust(TraitName::Conscientiousness, 0.03);
        }
        if self.fep.attention() < 20.0 {
            self.traits.adjust(TraitName::Neuroticism, 0.03);
            self.traits.adjust(TraitName::Extraversion, -0.02);
        }

        self.traits.propagate_connections();
        self.traits.maybe_mutate(rng);
    }

    // --- Invariants ---

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if !self.vitals.in_bounds() {
            return Err(InvariantViolation::VitalOutOfBounds {
                pet: self.id.clone(),
                vital: "vitals",
                value: self.vitals.mood,
            });
        }
        if !self.needs.in_bounds() {
            return Err(InvariantViolation::NeedOutOfBounds {
                pet: self.id.clone(),
                value: self.needs.mean(),
            });
        }

        let boundary = self.energy.boundary();
        if !(0.1..=1.0).contains(&boundary.permeability()) {
            return Err(InvariantViolation::BoundaryOutOfBounds {
                pet: self.id.clone(),
                field: "permeability",
                value: boundary.permeability(),
            });
        }
        if !(0.2..=2.0).contains(&boundary.size()) {
            return Err(InvariantViolation::BoundaryOutOfBounds {
                pet: self.id.clone(),
                field: "size",
                value: boundary.size(),
            });
        }

        if !self.relationships.in_bounds() {
            return Err(InvariantViolation::RelationshipOutOfBounds {
                pet: self.id.clone(),
            });
        }

        for element in boundary.assimilated().values() {
            if !(0.0..=1.0).contains(&element.integration) {
                return Err(InvariantViolation::IntegrationOutOfBounds {
                    pet: self.id.clone(),
                    value: element.integration,
                });
            }
        }

        Ok(())
    }
}
