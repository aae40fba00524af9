//! Mock mandate gateway for testing.
//!
//! Configurable implementation of [`MandateGateway`]: script per-attempt
//! responses, set a standing default, and inspect the recorded calls
//! (including when each happened, for asserting on the delay schedule under
//! paused tokio time).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{CustomerId, MandateId};
use crate::ports::{GatewayError, MandateGateway};

/// Recorded gateway call.
#[derive(Debug, Clone)]
pub struct GatewayCall {
    pub customer_id: CustomerId,
    pub consumer_name: String,
    /// When the call happened, on the tokio clock.
    pub at: tokio::time::Instant,
}

#[derive(Default)]
struct MockState {
    /// Scripted responses consumed in order.
    script: VecDeque<Result<MandateId, ScriptedError>>,

    /// Standing response once the script is drained.
    default: Option<MandateId>,

    /// Every call made, in order.
    calls: Vec<GatewayCall>,
}

/// Scripted error shapes; `CustomerNotFound` is bound to the actual
/// customer id at call time.
#[derive(Debug, Clone)]
enum ScriptedError {
    CustomerNotFound,
    Api {
        status: u16,
        title: String,
        detail: String,
    },
    Network(String),
}

/// Mock mandate gateway.
#[derive(Default)]
pub struct MockMandateGateway {
    inner: Mutex<MockState>,
}

impl MockMandateGateway {
    /// Mock with no scripted responses; unscripted calls return a network
    /// error so forgotten setup fails loudly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose standing response is a successful creation.
    pub fn succeeding_with(mandate_id: MandateId) -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().default = Some(mandate_id);
        mock
    }

    /// Script a successful creation for the next unscripted call.
    pub fn push_success(&self, mandate_id: MandateId) {
        self.inner.lock().unwrap().script.push_back(Ok(mandate_id));
    }

    /// Script a retryable customer-not-found error.
    pub fn push_customer_not_found(&self) {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back(Err(ScriptedError::CustomerNotFound));
    }

    /// Script a fatal processor API error.
    pub fn push_api_error(&self, status: u16, title: &str, detail: &str) {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back(Err(ScriptedError::Api {
                status,
                title: title.to_string(),
                detail: detail.to_string(),
            }));
    }

    /// Script a network failure.
    pub fn push_network_error(&self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back(Err(ScriptedError::Network(message.to_string())));
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Recorded calls, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl MandateGateway for MockMandateGateway {
    async fn create_mandate(
        &self,
        customer_id: &CustomerId,
        consumer_name: &str,
        _consumer_account: &str,
    ) -> Result<MandateId, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push(GatewayCall {
            customer_id: customer_id.clone(),
            consumer_name: consumer_name.to_string(),
            at: tokio::time::Instant::now(),
        });

        match state.script.pop_front() {
            Some(Ok(mandate_id)) => Ok(mandate_id),
            Some(Err(ScriptedError::CustomerNotFound)) => {
                Err(GatewayError::CustomerNotFound(customer_id.clone()))
            }
            Some(Err(ScriptedError::Api {
                status,
                title,
                detail,
            })) => Err(GatewayError::Api {
                status,
                title,
                detail,
            }),
            Some(Err(ScriptedError::Network(message))) => Err(GatewayError::Network(message)),
            None => match &state.default {
                Some(mandate_id) => Ok(mandate_id.clone()),
                None => Err(GatewayError::Network(
                    "mock gateway has no scripted response".to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerId {
        CustomerId::new("cst_8wmqcHMN4U").unwrap()
    }

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let mock = MockMandateGateway::new();
        mock.push_customer_not_found();
        mock.push_success(MandateId::new("mdt_h3gAaD5zP").unwrap());

        let first = mock.create_mandate(&customer(), "J. de Vries", "NL91...").await;
        assert!(matches!(first, Err(GatewayError::CustomerNotFound(_))));

        let second = mock.create_mandate(&customer(), "J. de Vries", "NL91...").await;
        assert_eq!(second.unwrap().as_str(), "mdt_h3gAaD5zP");
    }

    #[tokio::test]
    async fn unscripted_call_fails_loudly() {
        let mock = MockMandateGateway::new();
        let result = mock.create_mandate(&customer(), "J. de Vries", "NL91...").await;
        assert!(matches!(result, Err(GatewayError::Network(_))));
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let mock = MockMandateGateway::succeeding_with(MandateId::new("mdt_h3gAaD5zP").unwrap());
        mock.create_mandate(&customer(), "J. de Vries", "NL91...")
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].consumer_name, "J. de Vries");
    }
}
