//! Member persistence port.
//!
//! The pipeline never mutates member records directly. It issues an explicit
//! activation command; the persistence collaborator applies it and reports
//! which sub-steps took effect, so partial failure after mandate creation is
//! a first-class, branchable outcome instead of an implicit listener error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{MandateId, MemberId, PaymentMethodId};

/// Command applied once per successfully created mandate.
///
/// Attaches the mandate token, discards the raw bank account number (never
/// retained in plaintext once a mandate token exists), and marks the payment
/// method, the member, and the member's first membership active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateMandateCommand {
    pub member_id: MemberId,
    pub payment_method_id: PaymentMethodId,
    pub mandate_id: MandateId,
}

/// Which activation sub-steps the store applied.
///
/// The batch is best-effort: the store applies as many steps as it can and
/// reports honestly rather than rolling back, because the processor-side
/// mandate already exists and must not be silently duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationReport {
    /// Mandate id stored on the payment method.
    pub mandate_attached: bool,

    /// Raw bank account number cleared from the payment method.
    pub bank_account_cleared: bool,

    /// Payment method marked active.
    pub payment_method_activated: bool,

    /// Member marked active.
    pub member_activated: bool,

    /// Member's first membership marked active.
    pub membership_activated: bool,
}

impl ActivationReport {
    /// Report with every step applied.
    pub fn complete() -> Self {
        Self {
            mandate_attached: true,
            bank_account_cleared: true,
            payment_method_activated: true,
            member_activated: true,
            membership_activated: true,
        }
    }

    /// Report with no step applied.
    pub fn empty() -> Self {
        Self {
            mandate_attached: false,
            bank_account_cleared: false,
            payment_method_activated: false,
            member_activated: false,
            membership_activated: false,
        }
    }

    /// True when every step applied.
    pub fn is_complete(&self) -> bool {
        self.mandate_attached
            && self.bank_account_cleared
            && self.payment_method_activated
            && self.member_activated
            && self.membership_activated
    }

    /// Names of the steps that did not apply, for reconciliation records.
    pub fn missing_steps(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.mandate_attached {
            missing.push("mandate_attached".to_string());
        }
        if !self.bank_account_cleared {
            missing.push("bank_account_cleared".to_string());
        }
        if !self.payment_method_activated {
            missing.push("payment_method_activated".to_string());
        }
        if !self.member_activated {
            missing.push("member_activated".to_string());
        }
        if !self.membership_activated {
            missing.push("membership_activated".to_string());
        }
        missing
    }
}

/// Errors from the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("member {0} not found")]
    MemberNotFound(MemberId),

    #[error("payment method {0} not found")]
    PaymentMethodNotFound(PaymentMethodId),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Port for member/payment-method/membership persistence.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Applies the activation command and reports which steps took effect.
    async fn apply_activation(
        &self,
        command: ActivateMandateCommand,
    ) -> Result<ActivationReport, StoreError>;

    /// Whether the payment method is still on file for the member.
    ///
    /// Used to verify the payment method was not removed out-of-band before
    /// the final submission attempt commits.
    async fn payment_method_exists(
        &self,
        member_id: &MemberId,
        payment_method_id: &PaymentMethodId,
    ) -> Result<bool, StoreError>;
}
