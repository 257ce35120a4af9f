//! State machine trait for status enums.
//!
//! The planning review status implements this trait so every approval goes
//! through the same transition check.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors list their outgoing edges; `transition_to` enforces them.
/// Self-loops are legal only when an implementor lists them explicitly.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs the transition, or reports `InvalidStateTransition`.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// A state is terminal when it has no edge leading to a different state.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().iter().all(|t| t == self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Enrollment {
        Active,
        OnLeave,
        Withdrawn,
    }

    impl StateMachine for Enrollment {
        fn valid_transitions(&self) -> Vec<Self> {
            use Enrollment::*;
            match self {
                Active => vec![OnLeave, Withdrawn],
                OnLeave => vec![Active, Withdrawn],
                Withdrawn => vec![Withdrawn],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(
            Enrollment::Active.transition_to(Enrollment::OnLeave).unwrap(),
            Enrollment::OnLeave
        );
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Enrollment::Withdrawn
            .transition_to(Enrollment::Active)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn self_loop_only_state_is_terminal() {
        assert!(Enrollment::Withdrawn.is_terminal());
        assert!(!Enrollment::Active.is_terminal());
    }
}
