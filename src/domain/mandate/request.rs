//! Mandate request work item.
//!
//! Created when a member selects a direct-debit payment method that has no
//! processor mandate yet. The identifiers are immutable once created; only
//! the activation pipeline mutates `attempt_count` and `status`, and the
//! work queue guarantees a single worker executes a given request at a time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CustomerId, MandateRequestId, MemberId, PaymentMethodId, StateMachine, Timestamp,
    ValidationError,
};

use super::MandateStatus;

/// Work item driving the mandate activation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandateRequest {
    /// Identifier of this work item.
    pub request_id: MandateRequestId,

    /// Member the mandate is being arranged for (back-reference, not
    /// ownership; the member record lives with the persistence collaborator).
    pub member_id: MemberId,

    /// Payment method the mandate will be attached to.
    pub payment_method_id: PaymentMethodId,

    /// Customer record at the payment processor.
    pub external_customer_id: CustomerId,

    /// Account holder name submitted with the mandate.
    pub consumer_name: String,

    /// IBAN submitted with the mandate. Held only until a mandate token
    /// exists; the activation stage clears the stored copy.
    pub consumer_account: String,

    /// Number of submission attempts started so far.
    pub attempt_count: u32,

    /// Lifecycle status.
    pub status: MandateStatus,

    /// When the work item was created.
    pub created_at: Timestamp,
}

impl MandateRequest {
    /// Creates a new pending request with zero attempts.
    pub fn new(
        member_id: MemberId,
        payment_method_id: PaymentMethodId,
        external_customer_id: CustomerId,
        consumer_name: impl Into<String>,
        consumer_account: impl Into<String>,
    ) -> Self {
        Self {
            request_id: MandateRequestId::new(),
            member_id,
            payment_method_id,
            external_customer_id,
            consumer_name: consumer_name.into(),
            consumer_account: consumer_account.into(),
            attempt_count: 0,
            status: MandateStatus::Pending,
            created_at: Timestamp::now(),
        }
    }

    /// Starts the next submission attempt and returns its ordinal (1-based).
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempt_count += 1;
        self.attempt_count
    }

    /// Records that the processor confirmed mandate creation.
    ///
    /// # Errors
    ///
    /// Returns error if the request is not `Pending`.
    pub fn mark_created(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(MandateStatus::Created)?;
        Ok(())
    }

    /// Records that all local activation side effects were applied.
    ///
    /// # Errors
    ///
    /// Returns error if the request is not `Created`.
    pub fn mark_activated(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(MandateStatus::Activated)?;
        Ok(())
    }

    /// Records terminal failure.
    ///
    /// # Errors
    ///
    /// Returns error if the request is already in a terminal state.
    pub fn mark_failed(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(MandateStatus::Failed)?;
        Ok(())
    }

    /// Whether no further pipeline work will happen for this request.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MandateRequest {
        MandateRequest::new(
            MemberId::new(),
            PaymentMethodId::new(),
            CustomerId::new("cst_8wmqcHMN4U").unwrap(),
            "J. de Vries",
            "NL91ABNA0417164300",
        )
    }

    #[test]
    fn new_request_is_pending_with_zero_attempts() {
        let request = request();
        assert_eq!(request.status, MandateStatus::Pending);
        assert_eq!(request.attempt_count, 0);
        assert!(!request.is_terminal());
    }

    #[test]
    fn begin_attempt_counts_from_one() {
        let mut request = request();
        assert_eq!(request.begin_attempt(), 1);
        assert_eq!(request.begin_attempt(), 2);
        assert_eq!(request.attempt_count, 2);
    }

    #[test]
    fn happy_path_reaches_activated() {
        let mut request = request();
        request.mark_created().unwrap();
        assert_eq!(request.status, MandateStatus::Created);
        request.mark_activated().unwrap();
        assert_eq!(request.status, MandateStatus::Activated);
        assert!(request.is_terminal());
    }

    #[test]
    fn pending_can_fail_directly() {
        let mut request = request();
        request.mark_failed().unwrap();
        assert_eq!(request.status, MandateStatus::Failed);
        assert!(request.is_terminal());
    }

    #[test]
    fn created_can_fail_on_activation() {
        let mut request = request();
        request.mark_created().unwrap();
        request.mark_failed().unwrap();
        assert_eq!(request.status, MandateStatus::Failed);
    }

    #[test]
    fn terminal_request_rejects_further_transitions() {
        let mut request = request();
        request.mark_failed().unwrap();
        assert!(request.mark_created().is_err());
        assert!(request.mark_failed().is_err());
    }

    #[test]
    fn cannot_activate_without_creation() {
        let mut request = request();
        assert!(request.mark_activated().is_err());
    }
}
