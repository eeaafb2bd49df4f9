//! Behaviour generation and execution.
//!
//! Behaviours emerge from needs, mood, traits, weather, time, region and
//! boundary state, then execute against the pet and the environment. Each
//! behaviour costs energy proportional to its intensity.

use crate::agent::pet_agent::PetAgent;
use crate::enums::{BehaviorKind, ExperienceKind, NeedKind, TraitName, Weather};
use crate::environment::{EnvView, Environment};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A behaviour selected for execution this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBehavior {
    pub kind: BehaviorKind,
    pub intensity: f32,
    /// The other party, for social behaviours.
    pub target: Option<String>,
}

impl ActiveBehavior {
    fn new(kind: BehaviorKind, intensity: f32) -> Self {
        ActiveBehavior {
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            target: None,
        }
    }

    fn targeting(kind: BehaviorKind, intensity: f32, target: String) -> Self {
        ActiveBehavior {
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            target: Some(target),
        }
    }
}

impl PetAgent {
    /// Generates this tick's behaviours from state, traits and environment.
    pub(crate) fn generate_behaviors(
        &self,
        view: &EnvView,
        rng: &mut impl Rng,
    ) -> Vec<ActiveBehavior> {
        let mut behaviors = Vec::new();

        // An exhausted pet only rests.
        if self.energy.energy() < 10.0 {
            behaviors.push(ActiveBehavior::new(BehaviorKind::Rest, 1.0));
            return behaviors;
        }

        // Need-driven behaviours.
        if self.needs.hunger > 70.0 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::SeekFood,
                self.needs.hunger / 100.0,
            ));
        }
        if self.needs.thirst > 70.0 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::SeekWater,
                self.needs.thirst / 100.0,
            ));
        }
        if self.needs.play > 70.0 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::Playful,
                self.needs.play / 100.0,
            ));
        }

        // Mood extremes.
        if self.vitals.mood < 30.0 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::Sad,
                (30.0 - self.vitals.mood) / 30.0,
            ));
        } else if self.vitals.mood > 70.0 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::Happy,
                (self.vitals.mood - 70.0) / 30.0,
            ));
        }

        // Social behaviours toward a neighbour in the same region.
        if self.needs.social > 50.0 {
            let neighbours = view
                .own_region()
                .map(|r| {
                    r.current_pets
                        .iter()
                        .filter(|p| **p != self.id)
                        .cloned()
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            if let Some(neighbour) = neighbours.first() {
                let relationship = self.relationships.pet(neighbour);
                let (kind, intensity) = if relationship > 3.0 {
                    (BehaviorKind::SocialFriendly, 0.7)
                } else if relationship < -3.0 {
                    (BehaviorKind::SocialAvoid, 0.7)
                } else {
                    (BehaviorKind::SocialCurious, 0.5)
                };
                behaviors.push(ActiveBehavior::targeting(
                    kind,
                    intensity,
                    neighbour.to_string(),
                ));
            }
        }

        // A neglected pet leans on its strongest human bond.
        if self.fep.attention() < 20.0 {
            if let Some((user, strength)) = self
                .relationships
                .humans()
                .iter()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            {
                if *strength > 3.0 {
                    behaviors.push(ActiveBehavior::targeting(
                        BehaviorKind::SeekAttention,
                        (strength / 10.0).min(0.9),
                        user.clone(),
                    ));
                }
            }
        }

        // Trait triggers.
        let curiosity = self.traits.get(TraitName::Curiosity);
        if curiosity > 0.7 {
            behaviors.push(ActiveBehavior::new(BehaviorKind::Explore, curiosity - 0.3));
        }

        // Idle filler.
        if rng.gen::<f32>() < 0.1 {
            let kind = BehaviorKind::IDLE[rng.gen_range(0..BehaviorKind::IDLE.len())].clone();
            behaviors.push(ActiveBehavior::new(kind, rng.gen::<f32>() * 0.5));
        }

        // Trained behaviours fire by their stored activation.
        for (skill, activation) in &self.behavior_activations {
            if rng.gen::<f32>() < *activation {
                behaviors.push(ActiveBehavior::new(
                    BehaviorKind::Trained(skill.clone()),
                    *activation,
                ));
            }
        }

        let permeability = self.energy.boundary().permeability();

        // Weather rules.
        match view.weather {
            Weather::Rainy | Weather::Stormy if permeability > 0.7 => {
                behaviors.push(ActiveBehavior::new(BehaviorKind::SeekShelter, 0.7));
            }
            Weather::Clear if permeability > 0.5 => {
                behaviors.push(ActiveBehavior::new(BehaviorKind::Sunbathe, 0.5));
            }
            _ => {}
        }

        // Time-of-day rules.
        let hour = view.time_of_day;
        if !(6.0..22.0).contains(&hour) {
            let neuroticism = self.traits.get(TraitName::Neuroticism);
            if neuroticism > 0.6 {
                behaviors.push(ActiveBehavior::new(
                    BehaviorKind::NightAlert,
                    neuroticism - 0.4,
                ));
            } else if self.needs.rest > 60.0 {
                behaviors.push(ActiveBehavior::new(
                    BehaviorKind::DeepSleep,
                    self.needs.rest / 100.0,
                ));
            }
        }

        // Region flavour.
        match view.current_region.as_str() {
            "central" => behaviors.push(ActiveBehavior::new(BehaviorKind::SocialGather, 0.6)),
            "quiet" => behaviors.push(ActiveBehavior::new(BehaviorKind::Meditate, 0.7)),
            "play" => behaviors.push(ActiveBehavior::new(BehaviorKind::Frolic, 0.8)),
            _ => {}
        }

        // Novelty response.
        if let Some(novelty) = view.novelty_level {
            let openness = self.traits.get(TraitName::Openness);
            let neuroticism = self.traits.get(TraitName::Neuroticism);
            if novelty > 0.7 && openness > 0.5 {
                behaviors.push(ActiveBehavior::new(
                    BehaviorKind::Investigate,
                    novelty * openness,
                ));
            } else if novelty > 0.8 && neuroticism > 0.7 {
                behaviors.push(ActiveBehavior::new(
                    BehaviorKind::Cautious,
                    novelty * neuroticism,
                ));
            }
        }

        // Boundary-state rules.
        if permeability > 0.8 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::BoundaryRestoration,
                permeability - 0.5,
            ));
        } else if permeability < 0.3 {
            behaviors.push(ActiveBehavior::new(
                BehaviorKind::BoundaryStretching,
                0.8 - permeability,
            ));
        }

        behaviors
    }

    /// Executes behaviours against the pet and the environment.
    pub(crate) fn perform_behaviors(
        &mut self,
        behaviors: &[ActiveBehavior],
        env: &mut Environment,
        tick: u64,
    ) {
        for behavior in behaviors {
            let intensity = behavior.intensity;

            // Every behaviour costs energy.
            let cost = (intensity * 2.0).min(self.energy.energy());
            if cost > 0.0 {
                let _ = self.energy.consume_energy(cost, "behaviour");
            }

            match &behavior.kind {
                BehaviorKind::Rest => {
                    self.needs.adjust(NeedKind::Rest, -20.0 * intensity);
                }
                BehaviorKind::Explore => {
                    self.needs.adjust(NeedKind::Play, -10.0 * intensity);
                }
                BehaviorKind::SeekFood => {
                    let region = env.pet_location(&self.id);
                    let demand = BTreeMap::from([("food".to_string(), 10.0)]);
                    if let Ok(granted) = env.consume_resources(&region, &demand) {
                        if granted.get("food").copied().unwrap_or(0.0) > 0.0 {
                            self.needs.adjust(NeedKind::Hunger, -25.0 * intensity);
                        }
                    }
                }
                BehaviorKind::SeekWater => {
                    let region = env.pet_location(&self.id);
                    let demand = BTreeMap::from([("water".to_string(), 10.0)]);
                    if let Ok(granted) = env.consume_resources(&region, &demand) {
                        if granted.get("water").copied().unwrap_or(0.0) > 0.0 {
                            self.needs.adjust(NeedKind::Thirst, -25.0 * intensity);
                        }
                    }
                }
                BehaviorKind::Sunbathe => {
                    self.energy.add_energy(5.0 * intensity, "sunbathing");
                    self.vitals.adjust_mood(3.0 * intensity);
                    self.needs.adjust(NeedKind::Rest, -10.0 * intensity);
                }
                BehaviorKind::SeekShelter => {
                    self.energy
                        .boundary_mut()
                        .adjust_permeability(-0.1 * intensity, 0.3);
                }
                BehaviorKind::NightAlert => {
                    let drain = (3.0 * intensity).min(self.energy.energy());
                    let _ = self.energy.consume_energy(drain, "night_alert");
                    self.energy.boundary_mut().adjust_size(0.1 * intensity, 1.5);
                }
                BehaviorKind::DeepSleep => {
                    self.energy.add_energy(10.0 * intensity, "deep_sleep");
                    self.needs.adjust(NeedKind::Rest, -30.0 * intensity);
                    self.energy.boundary_mut().scale_maintenance_cost(0.9);
                }
                BehaviorKind::Investigate => {
                    self.cognition.process_experience(
                        ExperienceKind::Exploration,
                        0.8 * intensity,
                        self.traits.values(),
                        tick,
                    );
                    self.needs.adjust(NeedKind::Play, -15.0 * intensity);
                }
                BehaviorKind::BoundaryRestoration => {
                    let invested = (self.energy.energy() * 0.2).min(10.0 * intensity);
                    if invested > 0.0 {
                        let _ = self.energy.consume_energy(invested, "boundary_repair");
                    }
                    self.energy
                        .boundary_mut()
                        .adjust_permeability(-0.15 * intensity, 0.3);
                }
                BehaviorKind::BoundaryStretching => {
                    self.energy
                        .boundary_mut()
                        .raise_permeability(0.1 * intensity, 0.8);
                    self.cognition.process_experience(
                        ExperienceKind::BoundaryChallenge,
                        0.7 * intensity,
                        self.traits.values(),
                        tick,
                    );
                }
                // Remaining behaviours carry only their energy cost; their
                // cognitive footprint lands via the experience step.
                _ => {}
            }
        }
    }
}
