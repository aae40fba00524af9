//! SubmitMandateHandler - submission and activation stages of the pipeline.
//!
//! One `handle` call is one delivery of a [`MandateRequest`] to a worker.
//! The outcome tells the scheduler what to do next; pipeline errors are
//! turned into recorded outcomes here and never cross the worker boundary
//! as panics or stray `Err`s.

use std::sync::Arc;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::domain::foundation::{MandateId, Timestamp};
use crate::domain::mandate::{MandateEvent, MandateFailure, MandateRequest};
use crate::ports::{
    ActivateMandateCommand, ActivationReport, EventPublisher, GatewayError, MandateGateway,
    MemberStore,
};

/// What the scheduler should do with a request after one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mandate created and every local activation step applied.
    Activated { mandate_id: MandateId },

    /// Retryable processor error; redeliver after the given delay.
    Retry { delay: Duration },

    /// Terminal failure; no mandate exists for this request.
    Failed { failure: MandateFailure },

    /// Mandate exists at the processor but local activation was only
    /// partially applied. Needs manual reconciliation; the mandate must not
    /// be recreated.
    ActivationIncomplete {
        mandate_id: MandateId,
        missing_steps: Vec<String>,
    },
}

impl SubmitOutcome {
    /// Whether the request reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmitOutcome::Retry { .. })
    }
}

/// Handler executing one submission attempt of a mandate request.
pub struct SubmitMandateHandler {
    gateway: Arc<dyn MandateGateway>,
    store: Arc<dyn MemberStore>,
    publisher: Arc<dyn EventPublisher>,
    retry: RetryConfig,
}

impl SubmitMandateHandler {
    pub fn new(
        gateway: Arc<dyn MandateGateway>,
        store: Arc<dyn MemberStore>,
        publisher: Arc<dyn EventPublisher>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            gateway,
            store,
            publisher,
            retry,
        }
    }

    /// Executes one submission attempt.
    ///
    /// Increments the attempt count, submits mandate creation to the
    /// processor, and on success runs the activation stage as a synchronous
    /// continuation of the same delivery.
    pub async fn handle(&self, request: &mut MandateRequest) -> SubmitOutcome {
        let attempt = request.begin_attempt();

        tracing::info!(
            request_id = %request.request_id,
            member_id = %request.member_id,
            customer_id = %request.external_customer_id,
            attempt,
            "submitting mandate creation"
        );

        // The processor call cannot be canceled once made; before committing
        // the final attempt, make sure the payment method was not removed
        // out-of-band while retries were pending.
        if !self.retry.attempts_remain_after(attempt) {
            match self
                .store
                .payment_method_exists(&request.member_id, &request.payment_method_id)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    return self
                        .fail(
                            request,
                            attempt,
                            "payment method removed before final attempt".to_string(),
                        )
                        .await;
                }
                Err(err) => {
                    // Cannot verify; proceed with the attempt rather than
                    // losing the last chance at a mandate.
                    tracing::warn!(
                        request_id = %request.request_id,
                        error = %err,
                        "payment method check failed before final attempt"
                    );
                }
            }
        }

        let created = self
            .gateway
            .create_mandate(
                &request.external_customer_id,
                &request.consumer_name,
                &request.consumer_account,
            )
            .await;

        match created {
            Ok(mandate_id) => self.activate(request, mandate_id).await,
            Err(err) if err.is_retryable() => {
                if self.retry.attempts_remain_after(attempt) {
                    let delay = self.retry.delay_before(attempt + 1);
                    tracing::warn!(
                        request_id = %request.request_id,
                        customer_id = %request.external_customer_id,
                        attempt,
                        delay_secs = delay.as_secs(),
                        "customer not yet visible at processor, retrying"
                    );
                    SubmitOutcome::Retry { delay }
                } else {
                    self.fail(request, attempt, format!("attempts exhausted: {}", err))
                        .await
                }
            }
            Err(err) => self.fail(request, attempt, err.to_string()).await,
        }
    }

    /// Activation stage: attach the mandate and apply the local side
    /// effects as a best-effort batch.
    async fn activate(&self, request: &mut MandateRequest, mandate_id: MandateId) -> SubmitOutcome {
        if let Err(err) = request.mark_created() {
            // The queue's single-delivery guarantee makes this unreachable in
            // practice; record it rather than trusting that.
            return self.fail(request, request.attempt_count, err.to_string()).await;
        }

        self.publish(MandateEvent::Created {
            member_id: request.member_id,
            payment_method_id: request.payment_method_id,
            mandate_id: mandate_id.clone(),
            occurred_at: Timestamp::now(),
        })
        .await;

        let command = ActivateMandateCommand {
            member_id: request.member_id,
            payment_method_id: request.payment_method_id,
            mandate_id: mandate_id.clone(),
        };

        let report = match self.store.apply_activation(command).await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(
                    request_id = %request.request_id,
                    mandate_id = %mandate_id,
                    error = %err,
                    "activation side effects failed after mandate creation"
                );
                ActivationReport::empty()
            }
        };

        if report.is_complete() {
            if let Err(err) = request.mark_activated() {
                return self.fail(request, request.attempt_count, err.to_string()).await;
            }
            tracing::info!(
                request_id = %request.request_id,
                mandate_id = %mandate_id,
                attempts = request.attempt_count,
                "mandate activated"
            );
            SubmitOutcome::Activated { mandate_id }
        } else {
            // The mandate already exists at the processor; do not roll back
            // and do not retry, surface for manual reconciliation.
            let missing_steps = report.missing_steps();
            tracing::error!(
                request_id = %request.request_id,
                mandate_id = %mandate_id,
                missing = ?missing_steps,
                "mandate created but activation incomplete"
            );

            let _ = request.mark_failed();
            self.publish(MandateEvent::ActivationIncomplete {
                member_id: request.member_id,
                payment_method_id: request.payment_method_id,
                mandate_id: mandate_id.clone(),
                missing_steps: missing_steps.clone(),
                occurred_at: Timestamp::now(),
            })
            .await;

            SubmitOutcome::ActivationIncomplete {
                mandate_id,
                missing_steps,
            }
        }
    }

    /// Records a terminal failure with full context and publishes the fact.
    async fn fail(
        &self,
        request: &mut MandateRequest,
        attempts: u32,
        message: String,
    ) -> SubmitOutcome {
        let failure = MandateFailure {
            external_customer_id: request.external_customer_id.clone(),
            member_id: request.member_id,
            payment_method_id: request.payment_method_id,
            message,
            attempts_used: attempts,
        };

        tracing::error!(
            request_id = %request.request_id,
            customer_id = %failure.external_customer_id,
            member_id = %failure.member_id,
            payment_method_id = %failure.payment_method_id,
            attempts = failure.attempts_used,
            reason = %failure.message,
            "mandate creation failed"
        );

        if request.mark_failed().is_err() {
            tracing::warn!(
                request_id = %request.request_id,
                status = ?request.status,
                "request already terminal while recording failure"
            );
        }

        self.publish(MandateEvent::Failed {
            failure: failure.clone(),
            occurred_at: Timestamp::now(),
        })
        .await;

        SubmitOutcome::Failed { failure }
    }

    /// Best-effort publish; a sink outage must not undo pipeline progress.
    async fn publish(&self, event: MandateEvent) {
        let event_type = event.event_type();
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(event_type, error = %err, "event publish failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventPublisher;
    use crate::adapters::memory::InMemoryMemberStore;
    use crate::adapters::mollie::MockMandateGateway;
    use crate::domain::foundation::{CustomerId, MemberId, PaymentMethodId};
    use crate::domain::mandate::MandateStatus;

    fn mandate_id() -> MandateId {
        MandateId::new("mdt_h3gAaD5zP").unwrap()
    }

    fn handler(
        gateway: Arc<MockMandateGateway>,
        store: Arc<InMemoryMemberStore>,
        publisher: Arc<InMemoryEventPublisher>,
    ) -> SubmitMandateHandler {
        SubmitMandateHandler::new(gateway, store, publisher, RetryConfig::default())
    }

    fn request_for(store: &InMemoryMemberStore) -> MandateRequest {
        let member_id = MemberId::new();
        let payment_method_id = PaymentMethodId::new();
        store.add_member(member_id, payment_method_id, "NL91ABNA0417164300");
        MandateRequest::new(
            member_id,
            payment_method_id,
            CustomerId::new("cst_8wmqcHMN4U").unwrap(),
            "J. de Vries",
            "NL91ABNA0417164300",
        )
    }

    #[tokio::test]
    async fn first_attempt_success_activates() {
        let gateway = Arc::new(MockMandateGateway::succeeding_with(mandate_id()));
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway.clone(), store.clone(), publisher.clone());
        let mut request = request_for(&store);

        let outcome = handler.handle(&mut request).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Activated {
                mandate_id: mandate_id()
            }
        );
        assert_eq!(request.status, MandateStatus::Activated);
        assert_eq!(request.attempt_count, 1);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn success_publishes_created_fact() {
        let gateway = Arc::new(MockMandateGateway::succeeding_with(mandate_id()));
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway, store.clone(), publisher.clone());
        let mut request = request_for(&store);

        handler.handle(&mut request).await;

        let events = publisher.published();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "mandate.created");
    }

    #[tokio::test]
    async fn retryable_error_requests_first_schedule_delay() {
        let gateway = Arc::new(MockMandateGateway::new());
        gateway.push_customer_not_found();
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway, store.clone(), publisher);
        let mut request = request_for(&store);

        let outcome = handler.handle(&mut request).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Retry {
                delay: Duration::from_secs(10)
            }
        );
        assert_eq!(request.status, MandateStatus::Pending);
        assert_eq!(request.attempt_count, 1);
    }

    #[tokio::test]
    async fn fatal_error_fails_immediately() {
        let gateway = Arc::new(MockMandateGateway::new());
        gateway.push_api_error(422, "Unprocessable Entity", "The consumer account is invalid");
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway.clone(), store.clone(), publisher);
        let mut request = request_for(&store);

        let outcome = handler.handle(&mut request).await;

        match outcome {
            SubmitOutcome::Failed { failure } => {
                assert_eq!(failure.attempts_used, 1);
                assert!(failure.message.contains("422"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(request.status, MandateStatus::Failed);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn exhausted_attempts_record_the_reason() {
        let gateway = Arc::new(MockMandateGateway::new());
        for _ in 0..5 {
            gateway.push_customer_not_found();
        }
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway, store.clone(), publisher);
        let mut request = request_for(&store);

        let mut last = handler.handle(&mut request).await;
        while let SubmitOutcome::Retry { .. } = last {
            last = handler.handle(&mut request).await;
        }

        match last {
            SubmitOutcome::Failed { failure } => {
                assert_eq!(failure.attempts_used, 5);
                assert!(failure.message.contains("attempts exhausted"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(request.attempt_count, 5);
    }

    #[tokio::test]
    async fn removed_payment_method_aborts_final_attempt() {
        let gateway = Arc::new(MockMandateGateway::new());
        for _ in 0..4 {
            gateway.push_customer_not_found();
        }
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway.clone(), store.clone(), publisher);
        let mut request = request_for(&store);

        for _ in 0..4 {
            let outcome = handler.handle(&mut request).await;
            assert!(matches!(outcome, SubmitOutcome::Retry { .. }));
        }

        store.remove_payment_method(&request.member_id, &request.payment_method_id);
        let outcome = handler.handle(&mut request).await;

        match outcome {
            SubmitOutcome::Failed { failure } => {
                assert!(failure.message.contains("payment method removed"));
                assert_eq!(failure.attempts_used, 5);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        // The fifth attempt never reached the processor.
        assert_eq!(gateway.call_count(), 4);
    }

    #[tokio::test]
    async fn partial_activation_is_reported_not_retried() {
        let gateway = Arc::new(MockMandateGateway::succeeding_with(mandate_id()));
        let store = Arc::new(InMemoryMemberStore::new());
        store.fail_membership_activation();
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway.clone(), store.clone(), publisher.clone());
        let mut request = request_for(&store);

        let outcome = handler.handle(&mut request).await;

        match outcome {
            SubmitOutcome::ActivationIncomplete { missing_steps, .. } => {
                assert_eq!(missing_steps, vec!["membership_activated"]);
            }
            other => panic!("expected ActivationIncomplete, got {:?}", other),
        }
        assert_eq!(request.status, MandateStatus::Failed);
        // Created fact first, then the reconciliation fact; the mandate is
        // never recreated.
        let events = publisher.published();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type(), "mandate.activation_incomplete");
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn activation_clears_raw_bank_account() {
        let gateway = Arc::new(MockMandateGateway::succeeding_with(mandate_id()));
        let store = Arc::new(InMemoryMemberStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = handler(gateway, store.clone(), publisher);
        let mut request = request_for(&store);

        handler.handle(&mut request).await;

        let record = store
            .payment_method(&request.member_id, &request.payment_method_id)
            .expect("payment method should exist");
        assert_eq!(record.mandate_id, Some(mandate_id()));
        assert_eq!(record.bank_account, None);
        assert!(record.active);
        assert!(store.member_is_active(&request.member_id));
        assert!(store.first_membership_is_active(&request.member_id));
    }
}
