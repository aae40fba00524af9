//! Mandate domain events and failure records.
//!
//! Events are facts, named in past tense, published to the event sink with
//! at-least-once delivery. Downstream consumers must be idempotent on the
//! mandate id.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, MandateId, MemberId, PaymentMethodId, Timestamp};

/// Structured record of a terminal mandate failure.
///
/// Reported, never silently dropped; no automatic remediation is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandateFailure {
    /// Customer record at the payment processor.
    pub external_customer_id: CustomerId,

    /// Member the mandate was being arranged for.
    pub member_id: MemberId,

    /// Payment method the mandate would have been attached to.
    pub payment_method_id: PaymentMethodId,

    /// Why the pipeline gave up.
    pub message: String,

    /// Submission attempts used before giving up.
    pub attempts_used: u32,
}

/// Facts emitted during the mandate lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MandateEvent {
    /// The processor confirmed a mandate for this payment method.
    Created {
        member_id: MemberId,
        payment_method_id: PaymentMethodId,
        mandate_id: MandateId,
        occurred_at: Timestamp,
    },

    /// The pipeline gave up on obtaining a mandate.
    Failed {
        failure: MandateFailure,
        occurred_at: Timestamp,
    },

    /// The mandate exists at the processor but local activation was only
    /// partially applied. The mandate must NOT be recreated; the listed
    /// steps need manual reconciliation.
    ActivationIncomplete {
        member_id: MemberId,
        payment_method_id: PaymentMethodId,
        mandate_id: MandateId,
        missing_steps: Vec<String>,
        occurred_at: Timestamp,
    },
}

impl MandateEvent {
    /// Event type tag for routing and logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            MandateEvent::Created { .. } => "mandate.created",
            MandateEvent::Failed { .. } => "mandate.failed",
            MandateEvent::ActivationIncomplete { .. } => "mandate.activation_incomplete",
        }
    }
}
