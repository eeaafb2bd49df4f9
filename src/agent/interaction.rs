//! Interaction handlers: how user and pet messages change a pet.
//!
//! Each handler applies its fixed reduction table, boosts attention through
//! the cognitive core, and leaves an episodic record. Unknown kinds are
//! logged and dropped.

use crate::agent::memory::EpisodicRecord;
use crate::agent::pet_agent::PetAgent;
use crate::enums::NeedKind;
use crate::fep::EmojiTable;
use crate::sim::{Advice, Message, MessageContent, PromptContext, SemanticAdvisor};
use crate::types::PetId;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::warn;

impl PetAgent {
    /// Dispatches one inbox message. Returns the emoji reply, if one was
    /// produced.
    pub(crate) fn handle_message(
        &mut self,
        message: &Message,
        table: &EmojiTable,
        advisor: Option<&dyn SemanticAdvisor>,
        tick: u64,
        rng: &mut impl Rng,
    ) -> Option<String> {
        let mood_before = self.vitals.mood;
        let energy_before = self.energy.energy();

        let response = match &message.content {
            MessageContent::Feed { amount, kind } => {
                self.handle_feed(&message.sender, *amount, kind.multiplier(), tick);
                None
            }
            MessageContent::Play {
                intensity,
                duration,
            } => {
                self.handle_play(&message.sender, *intensity, *duration, tick);
                None
            }
            MessageContent::Pet { duration, location } => {
                self.handle_pet(&message.sender, *duration, *location, tick);
                None
            }
            MessageContent::Train {
                skill,
                difficulty,
                duration,
            } => {
                self.handle_train(&message.sender, skill, *difficulty, *duration, tick, rng);
                None
            }
            MessageContent::Check { duration } => {
                self.handle_check(&message.sender, *duration, tick);
                None
            }
            MessageContent::PetInteraction {
                compatibility,
                interaction,
                behavior,
            } => {
                self.handle_pet_interaction(
                    &message.sender,
                    *compatibility,
                    interaction,
                    behavior.as_deref(),
                    rng,
                );
                None
            }
            MessageContent::Emoji { sequence } => {
                Some(self.handle_emoji(sequence, table, advisor, tick, rng))
            }
            MessageContent::StatusUpdate | MessageContent::CollaborationRequest { .. } => None,
            MessageContent::Unknown { kind } => {
                warn!(pet = %self.id, kind = %kind, "dropping message of unknown kind");
                return None;
            }
        };

        let mut vital_deltas = BTreeMap::new();
        vital_deltas.insert("mood".to_string(), self.vitals.mood - mood_before);
        vital_deltas.insert("energy".to_string(), self.energy.energy() - energy_before);

        self.memory.record(EpisodicRecord {
            tick,
            counterpart: message.sender.clone(),
            kind: message.content.kind_name().to_string(),
            content: summarize_content(&message.content),
            vital_deltas,
            mood_before,
            mood_after: self.vitals.mood,
        });

        response
    }

    fn handle_feed(&mut self, sender: &str, amount: f32, multiplier: f32, tick: u64) {
        let reduction = amount * 20.0 * multiplier;
        self.needs.adjust(NeedKind::Hunger, -reduction);
        self.needs.adjust(NeedKind::Thirst, -reduction * 0.3);
        self.vitals.adjust_mood((reduction / 10.0).min(10.0));
        self.relationships.adjust_human(sender, 0.5, &self.traits);
        self.fep.receive_interaction(1.2, amount, tick);
    }

    fn handle_play(&mut self, sender: &str, intensity: f32, duration: f32, tick: u64) {
        let satisfaction = intensity * duration * 15.0;
        self.needs.adjust(NeedKind::Play, -satisfaction);
        self.needs.adjust(NeedKind::Social, -satisfaction * 0.5);
        self.vitals.adjust_mood((satisfaction / 5.0).min(20.0));

        let cost = (intensity * duration * 10.0).min(self.energy.energy());
        if cost > 0.0 {
            let _ = self.energy.consume_energy(cost, "play");
        }
        self.needs.adjust(NeedKind::Rest, intensity * duration * 5.0);

        self.relationships
            .adjust_human(sender, 1.0 * intensity, &self.traits);
        self.fep.receive_interaction(1.8, 2.0 * intensity, tick);
    }

    fn handle_pet(
        &mut self,
        sender: &str,
        duration: f32,
        location: crate::sim::PettingSpot,
        tick: u64,
    ) {
        use crate::enums::TraitName;
        use crate::sim::PettingSpot;

        self.needs.adjust(NeedKind::Social, -10.0 * duration);

        let extraversion = self.traits.get(TraitName::Extraversion);
        let affection = self.traits.get(TraitName::Affection);
        let location_multiplier = match location {
            PettingSpot::Belly if extraversion < 0.4 => 0.5,
            PettingSpot::Head if affection > 0.7 => 1.5,
            _ => 1.0,
        };
        self.vitals
            .adjust_mood(5.0 * duration * (0.5 + extraversion) * location_multiplier);

        self.relationships
            .adjust_human(sender, 0.3 * duration, &self.traits);
        self.fep.receive_interaction(1.5, duration, tick);
    }

    fn handle_train(
        &mut self,
        sender: &str,
        skill: &str,
        difficulty: f32,
        duration: f32,
        tick: u64,
        rng: &mut impl Rng,
    ) {
        use crate::enums::TraitName;

        let conscientiousness = self.traits.get(TraitName::Conscientiousness);
        let mut effectiveness = conscientiousness * duration;
        if difficulty > 1.5 * conscientiousness {
            effectiveness *= 0.5;
        }

        if rng.gen::<f32>() < effectiveness * 0.2 {
            self.behavior_activations
                .entry(skill.to_string())
                .or_insert(0.2);
        }

        let cost = (difficulty * duration * 5.0).min(self.energy.energy());
        if cost > 0.0 {
            let _ = self.energy.consume_energy(cost, "training");
        }
        self.needs.adjust(NeedKind::Rest, difficulty * duration * 3.0);

        self.relationships
            .adjust_human(sender, effectiveness * 0.5, &self.traits);
        self.fep.receive_interaction(1.3, 1.5 * duration, tick);
    }

    fn handle_check(&mut self, sender: &str, duration: f32, tick: u64) {
        self.needs.adjust(NeedKind::Social, -5.0 * duration);
        self.vitals.adjust_mood(2.0 * duration);
        self.relationships.adjust_human(sender, 0.1, &self.traits);
        self.fep.receive_interaction(0.8, 0.5 * duration, tick);
    }

    fn handle_pet_interaction(
        &mut self,
        sender: &str,
        compatibility: f32,
        interaction: &str,
        behavior: Option<&str>,
        rng: &mut impl Rng,
    ) {
        let Ok(other) = PetId::new(sender) else {
            warn!(sender, "pet interaction from unidentifiable sender");
            return;
        };

        self.relationships
            .adjust_pet(&other, 2.0 * (compatibility - 0.5));

        if self.relationships.pet(&other) > 0.0 {
            self.needs.adjust(NeedKind::Social, -10.0);
        }

        // Play encounters occasionally teach a behaviour by imitation.
        if interaction == "play" && rng.gen::<f32>() < 0.2 {
            if let Some(behavior) = behavior {
                self.behavior_activations
                    .entry(behavior.to_string())
                    .or_insert(0.3);
            }
        }
    }

    fn handle_emoji(
        &mut self,
        sequence: &str,
        table: &EmojiTable,
        advisor: Option<&dyn SemanticAdvisor>,
        tick: u64,
        rng: &mut impl Rng,
    ) -> String {
        let advice: Option<Advice> = advisor.and_then(|a| {
            a.advise(&PromptContext {
                pet_id: self.id.clone(),
                sequence: sequence.to_string(),
                attention: self.fep.attention(),
                thriving: self.fep.thriving(),
                mood: self.vitals.mood,
            })
        });

        let outcome = self
            .fep
            .process_emoji_interaction(sequence, table, advice.as_ref(), tick, rng);
        outcome.response
    }
}

fn summarize_content(content: &MessageContent) -> String {
    match content {
        MessageContent::Feed { amount, .. } => format!("feed x{amount:.1}"),
        MessageContent::Play { intensity, .. } => format!("play x{intensity:.1}"),
        MessageContent::Pet { duration, .. } => format!("pet x{duration:.1}"),
        MessageContent::Train { skill, .. } => format!("train {skill}"),
        MessageContent::Check { .. } => "check".to_string(),
        MessageContent::PetInteraction { compatibility, .. } => {
            format!("encounter c{compatibility:.2}")
        }
        MessageContent::Emoji { sequence } => sequence.clone(),
        MessageContent::StatusUpdate => "status".to_string(),
        MessageContent::CollaborationRequest { topic } => format!("collab {topic}"),
        MessageContent::Unknown { kind } => kind.clone(),
    }
}
