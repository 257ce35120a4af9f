//! Review status of a planning document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Review state of a planning document.
///
/// `EnRevision → Aprobado` is the only forward edge. Approving an already
/// approved document is allowed so the Director can rewrite feedback.
/// There is no rejected state; a teacher resubmits by uploading again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[default]
    #[serde(rename = "EN_REVISION")]
    EnRevision,
    #[serde(rename = "APROBADO")]
    Aprobado,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::EnRevision => "EN_REVISION",
            ReviewStatus::Aprobado => "APROBADO",
        }
    }
}

impl StateMachine for ReviewStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ReviewStatus::EnRevision => vec![ReviewStatus::Aprobado],
            ReviewStatus::Aprobado => vec![ReviewStatus::Aprobado],
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN_REVISION" => Ok(ReviewStatus::EnRevision),
            "APROBADO" => Ok(ReviewStatus::Aprobado),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("unknown review status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_in_review() {
        assert_eq!(ReviewStatus::default(), ReviewStatus::EnRevision);
    }

    #[test]
    fn in_review_can_be_approved() {
        assert_eq!(
            ReviewStatus::EnRevision.transition_to(ReviewStatus::Aprobado).unwrap(),
            ReviewStatus::Aprobado
        );
    }

    #[test]
    fn approval_is_idempotent() {
        assert!(ReviewStatus::Aprobado.can_transition_to(&ReviewStatus::Aprobado));
    }

    #[test]
    fn approved_never_goes_back_to_review() {
        assert!(ReviewStatus::Aprobado
            .transition_to(ReviewStatus::EnRevision)
            .is_err());
        assert!(ReviewStatus::Aprobado.is_terminal());
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("APROBADO".parse::<ReviewStatus>().unwrap(), ReviewStatus::Aprobado);
        assert!("RECHAZADO".parse::<ReviewStatus>().is_err());
    }
}
