//! Type-safe identifier wrappers for simulation entities.
//!
//! Each ID type is a newtype wrapper around String. Cross-references between
//! pets, projections and regions are always expressed as IDs resolved through
//! the owning container, never as direct pointers.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Error returned when an ID cannot be created from invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdError {
    /// The type of ID that failed to create.
    pub id_type: &'static str,
    /// Description of why the ID is invalid.
    pub reason: String,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for IdError {}

/// Macro to generate ID newtypes with common functionality.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $type_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is empty.
            pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(IdError {
                        id_type: $type_name,
                        reason: "ID cannot be empty".to_string(),
                    });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns the inner String.
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a pet agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use companion_dynamics::types::PetId;
    ///
    /// let id = PetId::new("pet_001").unwrap();
    /// assert_eq!(id.as_str(), "pet_001");
    /// ```
    PetId,
    "PetId"
);

define_id!(
    /// Unique identifier for an authenticated owner.
    UserId,
    "UserId"
);

define_id!(
    /// Unique identifier for an anonymous session.
    SessionId,
    "SessionId"
);

define_id!(
    /// Identifier for a region of the environment.
    RegionId,
    "RegionId"
);

define_id!(
    /// Identifier for a projection placed into the environment.
    ProjectionId,
    "ProjectionId"
);

define_id!(
    /// Identifier for an assimilated element held behind a pet's boundary.
    ElementId,
    "ElementId"
);

impl PetId {
    /// Generates a fresh pet ID from the simulation PRNG.
    ///
    /// Uses the uuid builder over PRNG-supplied bytes so the core never
    /// touches a global entropy source and replays stay deterministic.
    #[must_use]
    pub fn generate(rng: &mut impl RngCore) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        PetId(format!("pet_{}", uuid.simple()))
    }
}
