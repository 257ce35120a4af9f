//! Grading period label.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

pub const MAX_PERIOD_LENGTH: usize = 50;

/// Free-form period label such as `SEP-Q1` or `Bimestre 2`.
///
/// Labels are compared exactly after trimming; the school decides its own
/// naming scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodLabel(String);

impl PeriodLabel {
    pub fn new(label: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("periodo"));
        }
        if trimmed.chars().count() > MAX_PERIOD_LENGTH {
            return Err(ValidationError::invalid_format(
                "periodo",
                format!("must be at most {} characters", MAX_PERIOD_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_trimmed() {
        assert_eq!(PeriodLabel::new(" SEP-Q1 ").unwrap().as_str(), "SEP-Q1");
    }

    #[test]
    fn blank_label_is_rejected() {
        assert!(PeriodLabel::new("").is_err());
    }
}
