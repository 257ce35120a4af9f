//! Strongly-typed identifier value objects.
//!
//! Every persisted entity is keyed by a UUID wrapped in its own newtype so
//! that a `StudentId` can never be passed where an `AccountId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier with the usual constructors and
/// `Display` / `FromStr` implementations.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a Director or Teacher account.
    AccountId
);

uuid_id!(
    /// Identifier of an academic cycle (school year).
    CycleId
);

uuid_id!(
    /// Identifier of an uploaded planning document.
    PlanningDocumentId
);

uuid_id!(
    /// Identifier of a class group (grade + letter).
    GroupId
);

uuid_id!(
    /// Identifier of an enrolled student.
    StudentId
);

uuid_id!(
    /// Identifier of a single attendance record.
    AttendanceRecordId
);

uuid_id!(
    /// Identifier of a file attached to a student's record.
    StudentDocumentId
);

uuid_id!(
    /// Identifier of a student procedure history entry.
    HistoryEntryId
);
