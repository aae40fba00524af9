//! In-memory implementation of the member persistence port.
//!
//! Backs tests and in-process embedding. Supports partial-failure injection
//! so the "mandate created but activation incomplete" path is exercisable.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{MandateId, MemberId, PaymentMethodId};
use crate::ports::{ActivateMandateCommand, ActivationReport, MemberStore, StoreError};

/// Payment method record as the store keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodRecord {
    /// Processor mandate token, once attached.
    pub mandate_id: Option<MandateId>,

    /// Raw bank account number; cleared when a mandate token exists.
    pub bank_account: Option<String>,

    /// Whether the payment method is usable for collection.
    pub active: bool,
}

#[derive(Debug, Clone)]
struct MemberRecord {
    active: bool,
    payment_methods: HashMap<PaymentMethodId, PaymentMethodRecord>,
    /// Memberships in creation order; activation touches the first.
    membership_active: Vec<bool>,
}

#[derive(Default)]
struct StoreState {
    members: HashMap<MemberId, MemberRecord>,
    fail_membership_step: bool,
    fail_storage: bool,
}

/// In-memory member store.
#[derive(Default)]
pub struct InMemoryMemberStore {
    inner: Mutex<StoreState>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inactive member with one pending payment method holding the
    /// given raw bank account number, and one inactive membership.
    pub fn add_member(
        &self,
        member_id: MemberId,
        payment_method_id: PaymentMethodId,
        bank_account: &str,
    ) {
        let mut payment_methods = HashMap::new();
        payment_methods.insert(
            payment_method_id,
            PaymentMethodRecord {
                mandate_id: None,
                bank_account: Some(bank_account.to_string()),
                active: false,
            },
        );
        self.inner.lock().unwrap().members.insert(
            member_id,
            MemberRecord {
                active: false,
                payment_methods,
                membership_active: vec![false],
            },
        );
    }

    /// Removes a payment method, simulating out-of-band operator cleanup.
    pub fn remove_payment_method(&self, member_id: &MemberId, payment_method_id: &PaymentMethodId) {
        if let Some(member) = self.inner.lock().unwrap().members.get_mut(member_id) {
            member.payment_methods.remove(payment_method_id);
        }
    }

    /// Makes the membership activation sub-step fail (partial batch).
    pub fn fail_membership_activation(&self) {
        self.inner.lock().unwrap().fail_membership_step = true;
    }

    /// Makes activation fail entirely with a storage error.
    pub fn fail_with_storage_error(&self) {
        self.inner.lock().unwrap().fail_storage = true;
    }

    /// Current payment method record, if on file.
    pub fn payment_method(
        &self,
        member_id: &MemberId,
        payment_method_id: &PaymentMethodId,
    ) -> Option<PaymentMethodRecord> {
        self.inner
            .lock()
            .unwrap()
            .members
            .get(member_id)
            .and_then(|member| member.payment_methods.get(payment_method_id))
            .cloned()
    }

    /// Whether the member is marked active.
    pub fn member_is_active(&self, member_id: &MemberId) -> bool {
        self.inner
            .lock()
            .unwrap()
            .members
            .get(member_id)
            .map(|member| member.active)
            .unwrap_or(false)
    }

    /// Whether the member's first membership is marked active.
    pub fn first_membership_is_active(&self, member_id: &MemberId) -> bool {
        self.inner
            .lock()
            .unwrap()
            .members
            .get(member_id)
            .and_then(|member| member.membership_active.first().copied())
            .unwrap_or(false)
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn apply_activation(
        &self,
        command: ActivateMandateCommand,
    ) -> Result<ActivationReport, StoreError> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_storage {
            return Err(StoreError::Storage("simulated storage outage".to_string()));
        }
        let fail_membership_step = state.fail_membership_step;

        let member = state
            .members
            .get_mut(&command.member_id)
            .ok_or(StoreError::MemberNotFound(command.member_id))?;

        let mut report = ActivationReport::empty();

        if let Some(method) = member.payment_methods.get_mut(&command.payment_method_id) {
            method.mandate_id = Some(command.mandate_id.clone());
            report.mandate_attached = true;

            method.bank_account = None;
            report.bank_account_cleared = true;

            method.active = true;
            report.payment_method_activated = true;
        }

        member.active = true;
        report.member_activated = true;

        if !fail_membership_step {
            if let Some(first) = member.membership_active.first_mut() {
                *first = true;
                report.membership_activated = true;
            }
        }

        Ok(report)
    }

    async fn payment_method_exists(
        &self,
        member_id: &MemberId,
        payment_method_id: &PaymentMethodId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .members
            .get(member_id)
            .map(|member| member.payment_methods.contains_key(payment_method_id))
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandate_id() -> MandateId {
        MandateId::new("mdt_h3gAaD5zP").unwrap()
    }

    #[tokio::test]
    async fn activation_applies_every_step() {
        let store = InMemoryMemberStore::new();
        let member_id = MemberId::new();
        let payment_method_id = PaymentMethodId::new();
        store.add_member(member_id, payment_method_id, "NL91ABNA0417164300");

        let report = store
            .apply_activation(ActivateMandateCommand {
                member_id,
                payment_method_id,
                mandate_id: mandate_id(),
            })
            .await
            .unwrap();

        assert!(report.is_complete());
        let record = store.payment_method(&member_id, &payment_method_id).unwrap();
        assert_eq!(record.mandate_id, Some(mandate_id()));
        assert_eq!(record.bank_account, None);
        assert!(record.active);
    }

    #[tokio::test]
    async fn membership_step_failure_yields_partial_report() {
        let store = InMemoryMemberStore::new();
        let member_id = MemberId::new();
        let payment_method_id = PaymentMethodId::new();
        store.add_member(member_id, payment_method_id, "NL91ABNA0417164300");
        store.fail_membership_activation();

        let report = store
            .apply_activation(ActivateMandateCommand {
                member_id,
                payment_method_id,
                mandate_id: mandate_id(),
            })
            .await
            .unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.missing_steps(), vec!["membership_activated"]);
        // Earlier steps still applied; the batch is best-effort.
        assert!(report.mandate_attached);
        assert!(store.member_is_active(&member_id));
    }

    #[tokio::test]
    async fn unknown_member_is_an_error() {
        let store = InMemoryMemberStore::new();
        let result = store
            .apply_activation(ActivateMandateCommand {
                member_id: MemberId::new(),
                payment_method_id: PaymentMethodId::new(),
                mandate_id: mandate_id(),
            })
            .await;
        assert!(matches!(result, Err(StoreError::MemberNotFound(_))));
    }

    #[tokio::test]
    async fn existence_check_tracks_removal() {
        let store = InMemoryMemberStore::new();
        let member_id = MemberId::new();
        let payment_method_id = PaymentMethodId::new();
        store.add_member(member_id, payment_method_id, "NL91ABNA0417164300");

        assert!(store
            .payment_method_exists(&member_id, &payment_method_id)
            .await
            .unwrap());

        store.remove_payment_method(&member_id, &payment_method_id);
        assert!(!store
            .payment_method_exists(&member_id, &payment_method_id)
            .await
            .unwrap());
    }
}
