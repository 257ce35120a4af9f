//! Result of resolving which cycle a view should be scoped to.

use serde::{Deserialize, Serialize};

use super::CycleName;

/// Where a resolved cycle name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleSource {
    /// The cycle flagged `is_active` in the store.
    Active,
    /// No cycle is flagged active; the configured fallback name was used.
    Fallback,
    /// The Director picked this cycle for the current session.
    Selected,
}

/// A cycle name together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCycle {
    pub name: CycleName,
    pub source: CycleSource,
}

impl ResolvedCycle {
    pub fn active(name: CycleName) -> Self {
        Self {
            name,
            source: CycleSource::Active,
        }
    }

    pub fn fallback(name: CycleName) -> Self {
        Self {
            name,
            source: CycleSource::Fallback,
        }
    }

    pub fn selected(name: CycleName) -> Self {
        Self {
            name,
            source: CycleSource::Selected,
        }
    }

    /// True when no active cycle exists and the name is a stand-in.
    pub fn is_fallback(&self) -> bool {
        self.source == CycleSource::Fallback
    }
}
