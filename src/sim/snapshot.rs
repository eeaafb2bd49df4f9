//! Snapshot export/import and the snapshot store interface.
//!
//! The blob schema is stable and versioned. A snapshot restores a pet up to
//! FEP internal histories and memory truncation: episodic memory exports
//! only its 50 most recent records.

use crate::agent::{
    CounterpartProfile, EpisodicRecord, Needs, PetAgent, PetMemory, RelationshipLedger,
    SemanticPattern, TraitProfile, Vitals, DEFAULT_ACTION_SPACE,
};
use crate::boundary::AssimilatedElement;
use crate::cognition::CognitiveDevelopment;
use crate::energy::EnergySystem;
use crate::enums::{CognitiveArea, LifeStage, TraitName};
use crate::fep::{FepCore, FepState};
use crate::types::{ElementId, PetId, ProjectionId, RegionId, SessionId, Timestamp, UserId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Episodic records retained in a snapshot.
const SNAPSHOT_EPISODIC_CAP: usize = 50;

/// Error returned when a snapshot cannot be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotError {
    pub reason: String,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid snapshot: {}", self.reason)
    }
}

impl std::error::Error for SnapshotError {}

/// Boundary scalars and elements as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryBlob {
    pub permeability: f32,
    pub size: f32,
    pub maintenance_cost: f32,
    pub assimilated: Vec<AssimilatedElement>,
}

/// The versioned pet snapshot blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSnapshot {
    pub version: u32,
    pub pet_id: PetId,
    pub owner_id: Option<UserId>,
    pub session_id: Option<SessionId>,
    pub name: String,
    pub creation_time: Timestamp,
    pub last_interaction_time: Timestamp,
    pub traits: BTreeMap<TraitName, f32>,
    /// Couplings keyed `source:target`.
    pub trait_connections: BTreeMap<String, f32>,
    pub vitals: Vitals,
    pub needs: Needs,
    pub boundary: BoundaryBlob,
    pub cognitive_areas: BTreeMap<CognitiveArea, f32>,
    pub fep: FepState,
    /// At most the 50 most recent episodic records.
    pub episodic: Vec<EpisodicRecord>,
    pub semantic: BTreeMap<String, SemanticPattern>,
    pub counterparts: BTreeMap<String, CounterpartProfile>,
    pub human_relationships: BTreeMap<String, f32>,
    pub pet_relationships: BTreeMap<PetId, f32>,
    pub behavior_activations: BTreeMap<String, f32>,
    /// Projections this pet still tracks, keyed by ID with their regions.
    pub projections: BTreeMap<ProjectionId, RegionId>,
    pub age: f32,
    pub development_stage: LifeStage,
}

/// Persistent storage for pet snapshots.
pub trait SnapshotStore {
    /// Persists a snapshot.
    ///
    /// # Errors
    ///
    /// Implementation-defined; a failed save is logged and the simulation
    /// continues.
    fn save(&mut self, pet_id: &PetId, snapshot: &PetSnapshot) -> Result<(), SnapshotError>;

    /// Loads the snapshot for a pet, if one exists.
    fn load(&self, pet_id: &PetId) -> Option<PetSnapshot>;
}

/// A simple in-process store, mainly for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: BTreeMap<PetId, PetSnapshot>,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        InMemorySnapshotStore::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&mut self, pet_id: &PetId, snapshot: &PetSnapshot) -> Result<(), SnapshotError> {
        self.snapshots.insert(pet_id.clone(), snapshot.clone());
        Ok(())
    }

    fn load(&self, pet_id: &PetId) -> Option<PetSnapshot> {
        self.snapshots.get(pet_id).cloned()
    }
}

impl PetAgent {
    /// Exports the pet as a versioned snapshot blob.
    #[must_use]
    pub fn export_snapshot(&self) -> PetSnapshot {
        let episodic: Vec<EpisodicRecord> = self
            .memory
            .recent(SNAPSHOT_EPISODIC_CAP)
            .into_iter()
            .cloned()
            .collect();

        let trait_connections = self
            .traits
            .connections()
            .iter()
            .map(|((a, b), w)| (format!("{}:{}", a.as_str(), b.as_str()), *w))
            .collect();

        let boundary = self.energy.boundary();

        PetSnapshot {
            version: SNAPSHOT_VERSION,
            pet_id: self.id.clone(),
            owner_id: self.owner.clone(),
            session_id: self.session.clone(),
            name: self.name.clone(),
            creation_time: self.created_at,
            last_interaction_time: self.last_interaction,
            traits: self.traits.values().clone(),
            trait_connections,
            vitals: self.vitals,
            needs: self.needs,
            boundary: BoundaryBlob {
                permeability: boundary.permeability(),
                size: boundary.size(),
                maintenance_cost: boundary.maintenance_cost(),
                assimilated: boundary.assimilated().values().cloned().collect(),
            },
            cognitive_areas: self.cognition.areas().clone(),
            fep: self.fep.export_state(),
            episodic,
            semantic: self.memory.semantic().clone(),
            counterparts: self.memory.counterparts().clone(),
            human_relationships: self.relationships.humans().clone(),
            pet_relationships: self.relationships.pets().clone(),
            behavior_activations: self.behavior_activations.clone(),
            projections: self.energy.exchange().projection_map().clone(),
            age: self.age_days,
            development_stage: self.life_stage(),
        }
    }

    /// Restores a pet from a snapshot blob.
    ///
    /// # Errors
    ///
    /// Rejects unknown versions, malformed trait-connection keys and
    /// mismatched FEP dimensions.
    pub fn from_snapshot(
        snapshot: PetSnapshot,
        rng: &mut impl Rng,
    ) -> Result<PetAgent, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError {
                reason: format!("unsupported version {}", snapshot.version),
            });
        }

        let mut connections = BTreeMap::new();
        for (key, weight) in &snapshot.trait_connections {
            let (a, b) = parse_connection_key(key)?;
            connections.insert((a, b), *weight);
        }
        let traits = TraitProfile::from_parts(snapshot.traits, connections);

        let mut energy = EnergySystem::new(snapshot.pet_id.clone(), snapshot.vitals.energy);
        energy.boundary_mut().restore(
            snapshot.boundary.permeability,
            snapshot.boundary.size,
            snapshot.boundary.maintenance_cost,
            snapshot
                .boundary
                .assimilated
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect::<BTreeMap<ElementId, AssimilatedElement>>(),
        );
        let (exchange, _) = energy.exchange_and_boundary_mut();
        exchange.restore_projections(snapshot.projections);

        let mut cognition = CognitiveDevelopment::new();
        for (area, value) in &snapshot.cognitive_areas {
            cognition.set_area(*area, *value);
        }

        let mut fep = FepCore::new(DEFAULT_ACTION_SPACE, rng);
        fep.import_state(snapshot.fep).map_err(|e| SnapshotError {
            reason: e.to_string(),
        })?;

        let mut memory = PetMemory::new();
        memory.restore(snapshot.episodic, snapshot.semantic, snapshot.counterparts);

        let mut relationships = RelationshipLedger::new();
        relationships.restore(snapshot.human_relationships, snapshot.pet_relationships);

        Ok(PetAgent {
            id: snapshot.pet_id,
            name: snapshot.name,
            owner: snapshot.owner_id,
            session: snapshot.session_id,
            created_at: snapshot.creation_time,
            last_interaction: snapshot.last_interaction_time,
            age_days: snapshot.age,
            traits,
            vitals: snapshot.vitals,
            needs: snapshot.needs,
            memory,
            relationships,
            energy,
            cognition,
            fep,
            behavior_activations: snapshot.behavior_activations,
        })
    }
}

fn parse_connection_key(key: &str) -> Result<(TraitName, TraitName), SnapshotError> {
    let mut parts = key.splitn(2, ':');
    let a = parts.next().unwrap_or_default();
    let b = parts.next().unwrap_or_default();
    let parse = |s: &str| {
        TraitName::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SnapshotError {
                reason: format!("unknown trait in connection key: {key}"),
            })
    };
    Ok((parse(a)?, parse(b)?))
}
