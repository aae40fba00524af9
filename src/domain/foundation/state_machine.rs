//! State machine trait for status enums.
//!
//! Gives lifecycle enums (mandate requests, payment methods) a validated
//! transition method and a uniform notion of terminal states.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table; validated transitions and
/// terminal-state detection come for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(
                format!("{:?}", self),
                format!("{:?}", target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SignatureStatus {
        Unsigned,
        Signed,
        Revoked,
    }

    impl StateMachine for SignatureStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use SignatureStatus::*;
            matches!((self, target), (Unsigned, Signed) | (Signed, Revoked))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use SignatureStatus::*;
            match self {
                Unsigned => vec![Signed],
                Signed => vec![Revoked],
                Revoked => vec![],
            }
        }
    }

    #[test]
    fn valid_transition_succeeds() {
        let next = SignatureStatus::Unsigned.transition_to(SignatureStatus::Signed);
        assert_eq!(next, Ok(SignatureStatus::Signed));
    }

    #[test]
    fn invalid_transition_is_rejected() {
        let result = SignatureStatus::Unsigned.transition_to(SignatureStatus::Revoked);
        assert!(result.is_err());
    }

    #[test]
    fn terminal_state_has_no_transitions() {
        assert!(SignatureStatus::Revoked.is_terminal());
        assert!(!SignatureStatus::Unsigned.is_terminal());
    }
}
