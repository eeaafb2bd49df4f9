//! Developmental life stages derived from age.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Life stage derived from a pet's age in simulated days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Infant,
    Child,
    Adolescent,
    Adult,
    Elder,
}

impl LifeStage {
    /// Derives the stage from age in simulated days.
    ///
    /// # Examples
    ///
    /// ```
    /// use companion_dynamics::enums::LifeStage;
    ///
    /// assert_eq!(LifeStage::from_age(0.5), LifeStage::Infant);
    /// assert_eq!(LifeStage::from_age(12.0), LifeStage::Adult);
    /// assert_eq!(LifeStage::from_age(30.0), LifeStage::Elder);
    /// ```
    #[must_use]
    pub fn from_age(age_days: f32) -> Self {
        if age_days < 1.0 {
            LifeStage::Infant
        } else if age_days < 5.0 {
            LifeStage::Child
        } else if age_days < 10.0 {
            LifeStage::Adolescent
        } else if age_days < 25.0 {
            LifeStage::Adult
        } else {
            LifeStage::Elder
        }
    }

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LifeStage::Infant => "infant",
            LifeStage::Child => "child",
            LifeStage::Adolescent => "adolescent",
            LifeStage::Adult => "adult",
            LifeStage::Elder => "elder",
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_half_open() {
        assert_eq!(LifeStage::from_age(0.99), LifeStage::Infant);
        assert_eq!(LifeStage::from_age(1.0), LifeStage::Child);
        assert_eq!(LifeStage::from_age(5.0), LifeStage::Adolescent);
        assert_eq!(LifeStage::from_age(10.0), LifeStage::Adult);
        assert_eq!(LifeStage::from_age(25.0), LifeStage::Elder);
    }
}
