//! School-level settings

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound for any "recent documents" listing.
pub const MAX_RECENT_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct SchoolConfig {
    /// Cycle name used when no cycle is flagged active
    #[serde(default = "default_fallback_cycle")]
    pub fallback_cycle: String,

    /// How many documents a teacher sees without a period filter
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl SchoolConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.fallback_cycle.trim();
        if name.is_empty() || name.chars().count() > 50 {
            return Err(ValidationError::InvalidFallbackCycle);
        }
        if self.recent_limit == 0 || self.recent_limit > MAX_RECENT_LIMIT {
            return Err(ValidationError::InvalidRecentLimit(MAX_RECENT_LIMIT));
        }
        Ok(())
    }
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            fallback_cycle: default_fallback_cycle(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_fallback_cycle() -> String {
    "2024-2025".to_string()
}

fn default_recent_limit() -> usize {
    10
}
