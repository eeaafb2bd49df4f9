//! Messages delivered to pets through the bus.
//!
//! Interaction payloads are closed variants; kinds the core does not know
//! arrive as `Unknown` and are logged and dropped by the handler rather
//! than carried around as strings.

use crate::types::PetId;
use serde::{Deserialize, Serialize};

/// Quality grade of food in a feed interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Basic,
    Premium,
    Treat,
}

impl FoodKind {
    /// Multiplier applied to the feed amount.
    #[must_use]
    pub fn multiplier(self) -> f32 {
        match self {
            FoodKind::Basic => 1.0,
            FoodKind::Premium => 1.5,
            FoodKind::Treat => 0.5,
        }
    }
}

/// Where the pet is being petted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PettingSpot {
    Head,
    Back,
    Belly,
}

/// Typed interaction payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MessageContent {
    Feed {
        amount: f32,
        kind: FoodKind,
    },
    Play {
        intensity: f32,
        duration: f32,
    },
    Pet {
        duration: f32,
        location: PettingSpot,
    },
    Train {
        skill: String,
        difficulty: f32,
        duration: f32,
    },
    Check {
        duration: f32,
    },
    PetInteraction {
        compatibility: f32,
        /// `meet` or `play`; play may trigger behaviour mimicry.
        interaction: String,
        /// Behaviour exposed by the initiating pet, if any.
        behavior: Option<String>,
    },
    Emoji {
        sequence: String,
    },
    StatusUpdate,
    CollaborationRequest {
        topic: String,
    },
    /// Fallback for kinds the core does not recognise.
    Unknown {
        kind: String,
    },
}

impl MessageContent {
    /// Attention multiplier for this interaction type.
    #[must_use]
    pub fn attention_multiplier(&self) -> f32 {
        match self {
            MessageContent::Emoji { .. } => 1.0,
            MessageContent::Pet { .. } => 1.5,
            MessageContent::Feed { .. } => 1.2,
            MessageContent::Play { .. } => 1.8,
            MessageContent::Train { .. } => 1.3,
            MessageContent::Check { .. } => 0.8,
            _ => 1.0,
        }
    }

    /// Short kind name used in memory records.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            MessageContent::Feed { .. } => "feed",
            MessageContent::Play { .. } => "play",
            MessageContent::Pet { .. } => "pet",
            MessageContent::Train { .. } => "train",
            MessageContent::Check { .. } => "check",
            MessageContent::PetInteraction { .. } => "pet_interaction",
            MessageContent::Emoji { .. } => "emoji",
            MessageContent::StatusUpdate => "status_update",
            MessageContent::CollaborationRequest { .. } => "collaboration_request",
            MessageContent::Unknown { .. } => "unknown",
        }
    }
}

/// A message addressed to one pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Sender identity: a user ID, session ID or pet ID.
    pub sender: String,
    pub recipient: PetId,
    pub content: MessageContent,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}
