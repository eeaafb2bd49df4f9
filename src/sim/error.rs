//! Fatal error taxonomy.
//!
//! Policy failures (refused assimilation, partial resource grants) are
//! ordinary return values and never appear here. Only invariant violations
//! unwind out of an agent step; the model quarantines the agent for the
//! tick and moves on.

use crate::types::PetId;
use std::fmt;

/// A bound check failed after clamping, or a state vector changed shape.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// A vital escaped `[0, 100]`.
    VitalOutOfBounds {
        pet: PetId,
        vital: &'static str,
        value: f32,
    },
    /// A need escaped `[0, 100]`.
    NeedOutOfBounds { pet: PetId, value: f32 },
    /// Boundary permeability or size escaped its band.
    BoundaryOutOfBounds {
        pet: PetId,
        field: &'static str,
        value: f32,
    },
    /// A relationship strength escaped `[-10, 10]`.
    RelationshipOutOfBounds { pet: PetId },
    /// An assimilated element's integration escaped `[0, 1]`.
    IntegrationOutOfBounds { pet: PetId, value: f32 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::VitalOutOfBounds { pet, vital, value } => {
                write!(f, "pet {pet}: vital {vital} out of bounds at {value}")
            }
            InvariantViolation::NeedOutOfBounds { pet, value } => {
                write!(f, "pet {pet}: need out of bounds at {value}")
            }
            InvariantViolation::BoundaryOutOfBounds { pet, field, value } => {
                write!(f, "pet {pet}: boundary {field} out of bounds at {value}")
            }
            InvariantViolation::RelationshipOutOfBounds { pet } => {
                write!(f, "pet {pet}: relationship strength out of bounds")
            }
            InvariantViolation::IntegrationOutOfBounds { pet, value } => {
                write!(f, "pet {pet}: integration level out of bounds at {value}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}
