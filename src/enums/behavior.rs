//! The closed set of pet behaviours.

use crate::enums::ExperienceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A behaviour a pet can activate during a tick.
///
/// The set is closed; behaviours acquired at runtime (training, mimicry)
/// travel through the `Trained` variant with their skill name attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    Rest,
    SeekFood,
    SeekWater,
    Playful,
    Sad,
    Happy,
    SocialFriendly,
    SocialAvoid,
    SocialCurious,
    SeekAttention,
    Explore,
    Groom,
    Stretch,
    LookAround,
    Yawn,
    SeekShelter,
    Sunbathe,
    NightAlert,
    DeepSleep,
    SocialGather,
    Meditate,
    Frolic,
    Investigate,
    Cautious,
    BoundaryRestoration,
    BoundaryStretching,
    Trained(String),
}

impl BehaviorKind {
    /// The idle behaviours eligible for the random 10% roll.
    pub const IDLE: [BehaviorKind; 4] = [
        BehaviorKind::Groom,
        BehaviorKind::Stretch,
        BehaviorKind::LookAround,
        BehaviorKind::Yawn,
    ];

    /// Experience kind this behaviour feeds into cognitive development,
    /// if any.
    #[must_use]
    pub fn experience_kind(&self) -> Option<ExperienceKind> {
        match self {
            BehaviorKind::Playful | BehaviorKind::Frolic => Some(ExperienceKind::Play),
            BehaviorKind::Explore | BehaviorKind::Investigate => Some(ExperienceKind::Exploration),
            BehaviorKind::SocialFriendly
            | BehaviorKind::SocialCurious
            | BehaviorKind::SocialGather
            | BehaviorKind::SeekAttention => Some(ExperienceKind::SocialInteraction),
            BehaviorKind::BoundaryStretching | BehaviorKind::BoundaryRestoration => {
                Some(ExperienceKind::BoundaryChallenge)
            }
            BehaviorKind::Trained(_) => Some(ExperienceKind::Learning),
            _ => None,
        }
    }

    /// Returns the behaviour name as reported in tick output.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            BehaviorKind::Rest => "rest".to_string(),
            BehaviorKind::SeekFood => "seek_food".to_string(),
            BehaviorKind::SeekWater => "seek_water".to_string(),
            BehaviorKind::Playful => "playful".to_string(),
            BehaviorKind::Sad => "sad".to_string(),
            BehaviorKind::Happy => "happy".to_string(),
            BehaviorKind::SocialFriendly => "social_friendly".to_string(),
            BehaviorKind::SocialAvoid => "social_avoid".to_string(),
            BehaviorKind::SocialCurious => "social_curious".to_string(),
            BehaviorKind::SeekAttention => "seek_attention".to_string(),
            BehaviorKind::Explore => "explore".to_string(),
            BehaviorKind::Groom => "groom".to_string(),
            BehaviorKind::Stretch => "stretch".to_string(),
            BehaviorKind::LookAround => "look_around".to_string(),
            BehaviorKind::Yawn => "yawn".to_string(),
            BehaviorKind::SeekShelter => "seek_shelter".to_string(),
            BehaviorKind::Sunbathe => "sunbathe".to_string(),
            BehaviorKind::NightAlert => "night_alert".to_string(),
            BehaviorKind::DeepSleep => "deep_sleep".to_string(),
            BehaviorKind::SocialGather => "social_gather".to_string(),
            BehaviorKind::Meditate => "meditate".to_string(),
            BehaviorKind::Frolic => "frolic".to_string(),
            BehaviorKind::Investigate => "investigate".to_string(),
            BehaviorKind::Cautious => "cautious".to_string(),
            BehaviorKind::BoundaryRestoration => "boundary_restoration".to_string(),
            BehaviorKind::BoundaryStretching => "boundary_stretching".to_string(),
            BehaviorKind::Trained(skill) => format!("trained_{}", skill),
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trained_behaviours_carry_skill_name() {
        let b = BehaviorKind::Trained("fetch".to_string());
        assert_eq!(b.name(), "trained_fetch");
        assert_eq!(b.experience_kind(), Some(ExperienceKind::Learning));
    }

    #[test]
    fn idle_set_has_four_entries() {
        assert_eq!(BehaviorKind::IDLE.len(), 4);
    }

    #[test]
    fn rest_feeds_no_experience() {
        assert_eq!(BehaviorKind::Rest.experience_kind(), None);
    }
}
