//! Mandate request lifecycle status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of a mandate activation work item.
///
/// ```text
/// Pending --(submitted, mandate created)--> Created --(side effects applied)--> Activated
/// Pending --(fatal processor error / attempts exhausted)--> Failed
/// Created --(activation side effects failed)--> Failed
/// ```
///
/// A retryable processor error keeps the request `Pending`; the re-enqueue
/// is attempt bookkeeping, not a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MandateStatus {
    /// Waiting for (or between) submission attempts.
    Pending,

    /// Mandate exists at the processor; local activation in progress.
    Created,

    /// Mandate attached and all local activation side effects applied.
    Activated,

    /// Terminal failure; recorded for operator follow-up.
    Failed,
}

impl StateMachine for MandateStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MandateStatus::*;
        matches!(
            (self, target),
            (Pending, Created) | (Pending, Failed) | (Created, Activated) | (Created, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MandateStatus::*;
        match self {
            Pending => vec![Created, Failed],
            Created => vec![Activated, Failed],
            Activated => vec![],
            Failed => vec![],
        }
    }
}
