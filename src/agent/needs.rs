//! Pet needs and their per-tick drift.

use crate::enums::NeedKind;
use crate::environment::EnvView;
use serde::{Deserialize, Serialize};

/// The five needs, each in `[0, 100]` where higher means more unmet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Needs {
    pub hunger: f32,
    pub thirst: f32,
    pub social: f32,
    pub play: f32,
    pub rest: f32,
}

impl Needs {
    /// Fresh pets start fully satisfied.
    #[must_use]
    pub fn new() -> Self {
        Needs::default()
    }

    /// Current value of a need.
    #[must_use]
    pub fn get(&self, kind: NeedKind) -> f32 {
        match kind {
            NeedKind::Hunger => self.hunger,
            NeedKind::Thirst => self.thirst,
            NeedKind::Social => self.social,
            NeedKind::Play => self.play,
            NeedKind::Rest => self.rest,
        }
    }

    /// Nudges a need, clamped into `[0, 100]`.
    pub fn adjust(&mut self, kind: NeedKind, delta: f32) {
        let slot = match kind {
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Thirst => &mut self.thirst,
            NeedKind::Social => &mut self.social,
            NeedKind::Play => &mut self.play,
            NeedKind::Rest => &mut self.rest,
        };
        *slot = (*slot + delta).clamp(0.0, 100.0);
    }

    /// Applies one tick of drift plus the environmental modifiers.
    ///
    /// Weather energy reduces rest need, negative weather mood raises the
    /// social need, meal hours add hunger, night hours add rest, and a
    /// social atmosphere soaks up loneliness.
    pub fn drift(&mut self, view: &EnvView) {
        for kind in NeedKind::ALL {
            self.adjust(kind, kind.drift_rate());
        }

        if let Some(effects) = view.weather_effects {
            self.adjust(NeedKind::Rest, -effects.energy * 0.5);
            if effects.mood < 0.0 {
                self.adjust(NeedKind::Social, effects.mood.abs() * 0.3);
            }
        }

        let hour = view.time_of_day;
        let meal_hour = (7.0..9.0).contains(&hour)
            || (12.0..14.0).contains(&hour)
            || (18.0..20.0).contains(&hour);
        if meal_hour {
            self.adjust(NeedKind::Hunger, 0.3);
        }
        if hour >= 22.0 || hour < 6.0 {
            self.adjust(NeedKind::Rest, 0.4);
        }

        if let Some(social) = view.social_atmosphere {
            self.adjust(NeedKind::Social, -social * 0.2);
            self.adjust(NeedKind::Rest, social * 0.1);
        }
    }

    /// Mean over all five needs.
    #[must_use]
    pub fn mean(&self) -> f32 {
        (self.hunger + self.thirst + self.social + self.play + self.rest) / 5.0
    }

    /// The most unmet need.
    #[must_use]
    pub fn dominant(&self) -> NeedKind {
        NeedKind::ALL
            .iter()
            .copied()
            .fold(NeedKind::Hunger, |best, kind| {
                if self.get(kind) > self.get(best) {
                    kind
                } else {
                    best
                }
            })
    }

    /// True when every need is inside `[0, 100]`.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        NeedKind::ALL
            .iter()
            .all(|k| (0.0..=100.0).contains(&self.get(*k)) && self.get(*k).is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Weather;
    use crate::types::RegionId;
    use std::collections::BTreeMap;

    fn view_at(hour: f32, weather: Weather) -> EnvView {
        EnvView {
            time_of_day: hour,
            weather,
            ambient_energy: 0.5,
            current_region: RegionId::new("central").unwrap(),
            day_of_week: Some(1),
            weather_effects: Some(weather.effects()),
            social_atmosphere: Some(0.5),
            emotional_tone: None,
            novelty_level: None,
            temperature: None,
            resources: BTreeMap::new(),
            regions: BTreeMap::new(),
            competing_pets: Vec::new(),
        }
    }

    #[test]
    fn drift_raises_every_need() {
        let mut needs = Needs::new();
        needs.drift(&view_at(10.0, Weather::Cloudy));
        assert!(needs.hunger > 0.0);
        assert!(needs.thirst > 0.0);
        assert!(needs.play > 0.0);
    }

    #[test]
    fn night_hours_add_rest_need() {
        let mut day = Needs::new();
        let mut night = Needs::new();
        day.drift(&view_at(15.0, Weather::Cloudy));
        night.drift(&view_at(23.0, Weather::Cloudy));
        assert!(night.rest > day.rest);
    }

    #[test]
    fn meal_hours_add_hunger() {
        let mut off_meal = Needs::new();
        let mut at_meal = Needs::new();
        off_meal.drift(&view_at(10.0, Weather::Cloudy));
        at_meal.drift(&view_at(12.5, Weather::Cloudy));
        assert!(at_meal.hunger > off_meal.hunger);
    }

    #[test]
    fn social_atmosphere_soaks_up_loneliness() {
        let mut lonely = Needs {
            social: 50.0,
            ..Needs::new()
        };
        let mut view = view_at(10.0, Weather::Cloudy);
        view.social_atmosphere = Some(1.0);
        lonely.drift(&view);
        // +0.3 drift − 0.2 atmosphere soak.
        assert!((lonely.social - 50.1).abs() < 1e-4);
    }

    #[test]
    fn needs_clamp_at_hundred() {
        let mut needs = Needs::new();
        for _ in 0..1000 {
            needs.drift(&view_at(23.0, Weather::Stormy));
        }
        assert!(needs.in_bounds());
        assert!((needs.thirst - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn dominant_picks_highest() {
        let needs = Needs {
            hunger: 10.0,
            thirst: 80.0,
            social: 20.0,
            play: 30.0,
            rest: 5.0,
        };
        assert_eq!(needs.dominant(), NeedKind::Thirst);
    }
}
