//! Academic cycle entity.
//!
//! A cycle is a school year (e.g. `2024-2025`). Exactly one cycle should be
//! flagged active at any time; the flag itself is flipped by the repository
//! inside a single transaction, so the entity only records the current value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CycleId, Timestamp, ValidationError};

/// Maximum length for a cycle display name.
pub const MAX_CYCLE_NAME_LENGTH: usize = 50;

/// Display name of a cycle, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleName(String);

impl CycleName {
    /// Validates and normalizes a cycle name.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `InvalidFormat` if it exceeds [`MAX_CYCLE_NAME_LENGTH`]
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("nombre"));
        }
        if trimmed.chars().count() > MAX_CYCLE_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "nombre",
                format!("must be at most {} characters", MAX_CYCLE_NAME_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CycleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A school year that scopes dashboards and planning documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicCycle {
    id: CycleId,
    name: CycleName,
    is_active: bool,
    created_at: Timestamp,
}

impl AcademicCycle {
    /// Creates a new, inactive cycle.
    pub fn new(name: CycleName) -> Self {
        Self {
            id: CycleId::new(),
            name,
            is_active: false,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a cycle from persistence.
    pub fn reconstitute(id: CycleId, name: CycleName, is_active: bool, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            is_active,
            created_at,
        }
    }

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn name(&self) -> &CycleName {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Sets the active flag. Only the repository's activation path should
    /// call this, after it has cleared every other cycle.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_name_is_trimmed() {
        let name = CycleName::new("  2025-2026 ").unwrap();
        assert_eq!(name.as_str(), "2025-2026");
    }

    #[test]
    fn cycle_name_rejects_blank() {
        assert!(matches!(
            CycleName::new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn cycle_name_rejects_overlong() {
        let long = "x".repeat(MAX_CYCLE_NAME_LENGTH + 1);
        assert!(CycleName::new(long).is_err());
    }

    #[test]
    fn new_cycle_starts_inactive() {
        let cycle = AcademicCycle::new(CycleName::new("2025-2026").unwrap());
        assert!(!cycle.is_active());
        assert_eq!(cycle.name().as_str(), "2025-2026");
    }
}
