//! The shared environment: global state, regions, projections and events.
//!
//! The environment advances once per tick, before any agent steps. Pets
//! sense it exclusively through [`Environment::get_pet_view`], whose richness
//! scales with boundary permeability, and mutate it exclusively through the
//! narrow interface below (projections, region population, resource
//! consumption). Projections created during tick *t* are held in a pending
//! buffer and become visible to views from tick *t + 1*.

use crate::environment::event::{ActiveEvent, MAX_ACTIVE_EVENTS};
use crate::environment::region::{Projection, Region, RegionFeature, ResourcePool};
use crate::environment::view::{EnvView, FeatureView, ProjectionView, RegionView};
use crate::enums::Weather;
use crate::types::{PetId, ProjectionId, RegionId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Error returned when an operation names a region that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionNotFound {
    pub region: RegionId,
}

impl fmt::Display for RegionNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region not found: {}", self.region)
    }
}

impl std::error::Error for RegionNotFound {}

/// Global tick-advanced environment state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    time_of_day: f32,
    day_of_week: u8,
    day_count: u64,
    ambient_energy: f32,
    social_atmosphere: f32,
    novelty_level: f32,
    emotional_tone: f32,
    temperature: f32,
    weather: Weather,
    resources: BTreeMap<String, ResourcePool>,
    regions: BTreeMap<RegionId, Region>,
    projections: BTreeMap<ProjectionId, Projection>,
    pending_projections: Vec<Projection>,
    events: VecDeque<ActiveEvent>,
    pet_locations: BTreeMap<PetId, RegionId>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    /// Creates the standard environment: three regions, stocked resources,
    /// clear morning weather.
    #[must_use]
    pub fn new() -> Self {
        let mut regions = BTreeMap::new();

        regions.insert(
            RegionId::new("central").expect("static ID"),
            Region {
                name: "Central Area".to_string(),
                features: vec![
                    RegionFeature {
                        kind: "social_hub".to_string(),
                        strength: 0.8,
                        complexity: 0.5,
                        effect: BTreeMap::from([("charisma".to_string(), 0.1)]),
                    },
                    RegionFeature {
                        kind: "resource_node".to_string(),
                        strength: 0.7,
                        complexity: 0.4,
                        effect: BTreeMap::from([("energy".to_string(), 0.5)]),
                    },
                ],
                resources: BTreeMap::from([
                    ("food".to_string(), ResourcePool::full(50.0, 0.3)),
                    ("water".to_string(), ResourcePool::full(50.0, 0.5)),
                    ("ambient_energy".to_string(), ResourcePool::full(1.2, 1.2)),
                ]),
                current_pets: Default::default(),
            },
        );

        regions.insert(
            RegionId::new("quiet").expect("static ID"),
            Region {
                name: "Quiet Corner".to_string(),
                features: vec![
                    RegionFeature {
                        kind: "rest_spot".to_string(),
                        strength: 0.9,
                        complexity: 0.3,
                        effect: BTreeMap::from([("mood".to_string(), 0.2)]),
                    },
                    RegionFeature {
                        kind: "knowledge_source".to_string(),
                        strength: 0.7,
                        complexity: 0.6,
                        effect: BTreeMap::from([("intelligence".to_string(), 0.2)]),
                    },
                ],
                resources: BTreeMap::from([
                    ("knowledge".to_string(), ResourcePool::full(30.0, 0.2)),
                    ("ambient_energy".to_string(), ResourcePool::full(0.8, 0.8)),
                ]),
                current_pets: Default::default(),
            },
        );

        regions.insert(
            RegionId::new("play").expect("static ID"),
            Region {
                name: "Play Zone".to_string(),
                features: vec![
                    RegionFeature {
                        kind: "playground".to_string(),
                        strength: 0.9,
                        complexity: 0.5,
                        effect: BTreeMap::from([("mood".to_string(), 0.3)]),
                    },
                    RegionFeature {
                        kind: "toy_collection".to_string(),
                        strength: 0.8,
                        complexity: 0.4,
                        effect: BTreeMap::from([("mood".to_string(), 0.1)]),
                    },
                ],
                resources: BTreeMap::from([
                    ("toys".to_string(), ResourcePool::full(30.0, 0.1)),
                    ("food".to_string(), ResourcePool::full(10.0, 0.3)),
                    ("ambient_energy".to_string(), ResourcePool::full(1.5, 1.5)),
                ]),
                current_pets: Default::default(),
            },
        );

        Environment {
            time_of_day: 8.0,
            day_of_week: 1,
            day_count: 0,
            ambient_energy: 1.0,
            social_atmosphere: 0.7,
            novelty_level: 0.5,
            emotional_tone: 0.5,
            temperature: 0.5,
            weather: Weather::Clear,
            resources: BTreeMap::from([
                ("food".to_string(), ResourcePool::full(100.0, 0.5)),
                ("water".to_string(), ResourcePool::full(100.0, 0.8)),
                ("toys".to_string(), ResourcePool::full(50.0, 0.2)),
                ("knowledge".to_string(), ResourcePool::full(100.0, 0.3)),
            ]),
            regions,
            projections: BTreeMap::new(),
            pending_projections: Vec::new(),
            events: VecDeque::new(),
            pet_locations: BTreeMap::new(),
        }
    }

    // --- Accessors ---

    /// Hour of day in `[0, 24)`.
    #[must_use]
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    /// Day of week in `1..=7`.
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Days elapsed since construction.
    #[must_use]
    pub fn day_count(&self) -> u64 {
        self.day_count
    }

    /// Current weather.
    #[must_use]
    pub fn weather(&self) -> Weather {
        self.weather
    }

    /// Overwrites the weather (event effects, test setup).
    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    /// Current ambient energy level.
    #[must_use]
    pub fn ambient_energy(&self) -> f32 {
        self.ambient_energy
    }

    /// Current novelty level in `[0, 1]`.
    #[must_use]
    pub fn novelty_level(&self) -> f32 {
        self.novelty_level
    }

    /// Number of currently active events.
    #[must_use]
    pub fn active_event_count(&self) -> usize {
        self.events.len()
    }

    /// Region IDs, in canonical order.
    #[must_use]
    pub fn region_ids(&self) -> Vec<RegionId> {
        self.regions.keys().cloned().collect()
    }

    /// Looks up a region.
    #[must_use]
    pub fn region(&self, region_id: &RegionId) -> Option<&Region> {
        self.regions.get(region_id)
    }

    /// The region a pet currently occupies (central until told otherwise).
    #[must_use]
    pub fn pet_location(&self, pet_id: &PetId) -> RegionId {
        self.pet_locations
            .get(pet_id)
            .cloned()
            .unwrap_or_else(|| RegionId::new("central").expect("static ID"))
    }

    /// Looks up a stored projection.
    #[must_use]
    pub fn projection(&self, id: &ProjectionId) -> Option<&Projection> {
        self.projections.get(id)
    }

    /// IDs of the projections originated by the given pet.
    #[must_use]
    pub fn projections_of(&self, pet_id: &PetId) -> Vec<ProjectionId> {
        self.projections
            .values()
            .filter(|p| &p.source_pet == pet_id)
            .map(|p| p.id.clone())
            .collect()
    }

    // --- Tick advance ---

    /// Advances the environment by one tick.
    ///
    /// Time moves 0.1 hours; day/week counters roll over at midnight; the
    /// weather chain transitions; ambient energy follows the daylight curve;
    /// resources regenerate; novelty decays with occasional spikes; events
    /// count down; pending projections become visible.
    pub fn step(&mut self, rng: &mut impl Rng) {
        self.time_of_day += 0.1;
        if self.time_of_day >= 24.0 {
            self.time_of_day -= 24.0;
            self.day_of_week = (self.day_of_week % 7) + 1;
            self.day_count += 1;
        }

        self.weather = self.weather.step(rng);
        self.temperature = 0.8 * self.temperature + 0.2 * rng.gen::<f32>();
        self.update_ambient_energy(rng);

        for pool in self.resources.values_mut() {
            pool.regenerate();
        }
        for region in self.regions.values_mut() {
            region.regenerate();
        }

        self.novelty_level = (self.novelty_level * 0.99).max(0.1);
        if rng.gen::<f32>() < 0.01 {
            self.novelty_level = (self.novelty_level + 0.3).min(1.0);
        }

        self.advance_events();

        let pending = std::mem::take(&mut self.pending_projections);
        for projection in pending {
            self.projections.insert(projection.id.clone(), projection);
        }
    }

    fn update_ambient_energy(&mut self, rng: &mut impl Rng) {
        let hour = self.time_of_day;
        let mut ambient = if (6.0..18.0).contains(&hour) {
            let day_energy = 0.6 + 0.4 * (1.0 - ((hour - 12.0) / 6.0).abs());
            day_energy * (0.8 + 0.4 * rng.gen::<f32>())
        } else {
            0.2 + 0.1 * rng.gen::<f32>()
        };

        if self.weather == Weather::Stormy {
            ambient *= 0.7;
        } else if self.weather == Weather::Clear && (10.0..14.0).contains(&hour) {
            ambient *= 1.3;
        }

        self.ambient_energy = ambient;
    }

    fn advance_events(&mut self) {
        for event in &mut self.events {
            event.remaining_ticks = event.remaining_ticks.saturating_sub(1);
        }
        self.events.retain(|event| event.remaining_ticks > 0);
    }

    /// Queues an event; the oldest event is dropped when the queue is full.
    pub fn push_event(&mut self, event: ActiveEvent) {
        if self.events.len() >= MAX_ACTIVE_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    // --- Narrow mutation interface used by agents ---

    /// Registers a projection; it becomes visible to views next tick.
    pub fn add_pet_projection(&mut self, projection: Projection) {
        self.pending_projections.push(projection);
    }

    /// Removes a projection outright.
    ///
    /// Returns true if the projection existed.
    pub fn remove_pet_projection(&mut self, projection_id: &ProjectionId) -> bool {
        if self.projections.remove(projection_id).is_some() {
            return true;
        }
        let before = self.pending_projections.len();
        self.pending_projections.retain(|p| &p.id != projection_id);
        self.pending_projections.len() < before
    }

    /// Overwrites a projection's stability; removes it at zero or below.
    ///
    /// Returns the stability left, or `None` if the projection is gone.
    pub fn set_projection_stability(
        &mut self,
        projection_id: &ProjectionId,
        stability: f32,
    ) -> Option<f32> {
        if stability <= 0.0 {
            self.projections.remove(projection_id);
            return None;
        }
        let projection = self.projections.get_mut(projection_id)?;
        projection.stability = stability.min(1.0);
        Some(projection.stability)
    }

    /// Moves a pet to another region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionNotFound`] if the region does not exist; the pet does
    /// not move.
    pub fn update_pet_location(
        &mut self,
        pet_id: &PetId,
        region_id: &RegionId,
    ) -> Result<(), RegionNotFound> {
        if !self.regions.contains_key(region_id) {
            return Err(RegionNotFound {
                region: region_id.clone(),
            });
        }
        let previous = self.pet_location(pet_id);
        if let Some(region) = self.regions.get_mut(&previous) {
            region.current_pets.remove(pet_id);
        }
        if let Some(region) = self.regions.get_mut(region_id) {
            region.current_pets.insert(pet_id.clone());
        }
        self.pet_locations.insert(pet_id.clone(), region_id.clone());
        Ok(())
    }

    /// Drops a pet from the environment entirely (destruction).
    pub fn remove_pet(&mut self, pet_id: &PetId) {
        let location = self.pet_location(pet_id);
        if let Some(region) = self.regions.get_mut(&location) {
            region.current_pets.remove(pet_id);
        }
        self.pet_locations.remove(pet_id);
        let ids: Vec<ProjectionId> = self.projections_of(pet_id);
        for id in ids {
            self.projections.remove(&id);
        }
        self.pending_projections.retain(|p| &p.source_pet != pet_id);
    }

    /// Consumes resources from a region; each resource grants up to its
    /// availability (partial fulfilment is not an error).
    ///
    /// # Errors
    ///
    /// Returns [`RegionNotFound`] when the region does not exist.
    pub fn consume_resources(
        &mut self,
        region_id: &RegionId,
        demands: &BTreeMap<String, f32>,
    ) -> Result<BTreeMap<String, f32>, RegionNotFound> {
        let region = self.regions.get_mut(region_id).ok_or_else(|| RegionNotFound {
            region: region_id.clone(),
        })?;
        let mut granted = BTreeMap::new();
        for (name, wanted) in demands {
            let amount = region
                .resources
                .get_mut(name)
                .map(|pool| pool.take(*wanted))
                .unwrap_or(0.0);
            granted.insert(name.clone(), amount);
        }
        Ok(granted)
    }

    // --- Views ---

    /// Builds the tiered view for a pet at the given permeability.
    pub fn get_pet_view(
        &self,
        pet_id: &PetId,
        permeability: f32,
        rng: &mut impl Rng,
    ) -> EnvView {
        let current_region = self.pet_location(pet_id);

        if permeability < 0.3 {
            return EnvView {
                time_of_day: self.time_of_day,
                weather: self.weather,
                ambient_energy: self.ambient_energy * permeability * 2.0,
                current_region,
                day_of_week: None,
                weather_effects: None,
                social_atmosphere: None,
                emotional_tone: None,
                novelty_level: None,
                temperature: None,
                resources: BTreeMap::new(),
                regions: BTreeMap::new(),
                competing_pets: Vec::new(),
            };
        }

        let full = permeability >= 0.7;
        let mut regions = BTreeMap::new();
        for (region_id, region) in &self.regions {
            let own = region_id == &current_region;
            if full || own {
                regions.insert(region_id.clone(), self.region_view(region_id, region, true));
            } else {
                // Partial glimpse: each feature reveals independently.
                let mut glimpse = self.region_view(region_id, region, false);
                glimpse.features = region
                    .features
                    .iter()
                    .filter(|_| rng.gen::<f32>() < permeability)
                    .map(feature_view)
                    .collect();
                regions.insert(region_id.clone(), glimpse);
            }
        }

        let competing_pets = if full {
            self.regions
                .iter()
                .filter(|(region_id, _)| *region_id != &current_region)
                .flat_map(|(_, region)| region.current_pets.iter().cloned())
                .filter(|other| other != pet_id)
                .collect()
        } else {
            Vec::new()
        };

        EnvView {
            time_of_day: self.time_of_day,
            weather: self.weather,
            ambient_energy: self.ambient_energy,
            current_region,
            day_of_week: Some(self.day_of_week),
            weather_effects: Some(self.weather.effects()),
            social_atmosphere: Some(self.social_atmosphere),
            emotional_tone: full.then_some(self.emotional_tone),
            novelty_level: full.then_some(self.novelty_level),
            temperature: full.then_some(self.temperature),
            resources: if full {
                self.resources
                    .iter()
                    .map(|(name, pool)| (name.clone(), pool.amount))
                    .collect()
            } else {
                BTreeMap::new()
            },
            regions,
            competing_pets,
        }
    }

    fn region_view(&self, region_id: &RegionId, region: &Region, detailed: bool) -> RegionView {
        RegionView {
            features: if detailed {
                region.features.iter().map(feature_view).collect()
            } else {
                Vec::new()
            },
            resources: if detailed {
                region
                    .resources
                    .iter()
                    .map(|(name, pool)| (name.clone(), pool.amount))
                    .collect()
            } else {
                BTreeMap::new()
            },
            current_pets: region.current_pets.iter().cloned().collect(),
            projections: self
                .projections
                .values()
                .filter(|p| &p.region == region_id)
                .map(|p| ProjectionView {
                    id: p.id.clone(),
                    kind: p.kind,
                    source_pet: p.source_pet.clone(),
                    region: p.region.clone(),
                    stability: p.stability,
                    trait_sample: p.trait_sample.clone(),
                })
                .collect(),
        }
    }

    /// Pets sharing a region with the given pet.
    #[must_use]
    pub fn neighbours_of(&self, pet_id: &PetId) -> Vec<PetId> {
        let location = self.pet_location(pet_id);
        self.regions
            .get(&location)
            .map(|region| {
                region
                    .current_pets
                    .iter()
                    .filter(|other| *other != pet_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn feature_view(feature: &RegionFeature) -> FeatureView {
    FeatureView {
        kind: feature.kind.clone(),
        strength: feature.strength,
        complexity: feature.complexity,
        effect: feature.effect.clone(),
    }
}
