//! Payment processor gateway port.
//!
//! Contract for creating SEPA direct-debit mandates at an external payment
//! processor (e.g. Mollie). The processor call is not cancellable; once
//! submitted, the pipeline can only stop scheduling further retries.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{CustomerId, MandateId};

/// Port for mandate creation at the payment processor.
#[async_trait]
pub trait MandateGateway: Send + Sync {
    /// Creates a direct-debit mandate for the given processor customer.
    ///
    /// Returns the processor-issued mandate id on success.
    ///
    /// # Errors
    ///
    /// [`GatewayError::CustomerNotFound`] typically means processor-side
    /// customer record propagation lag and is the only retryable condition.
    /// Every other error is fatal for the submission.
    async fn create_mandate(
        &self,
        customer_id: &CustomerId,
        consumer_name: &str,
        consumer_account: &str,
    ) -> Result<MandateId, GatewayError>;
}

/// Errors from the payment processor gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The referenced customer is not (yet) visible at the processor.
    #[error("customer {0} not found at the payment processor")]
    CustomerNotFound(CustomerId),

    /// The processor rejected the request.
    #[error("processor API error ({status}): {title}: {detail}")]
    Api {
        status: u16,
        title: String,
        detail: String,
    },

    /// The processor could not be reached.
    #[error("network error talking to the payment processor: {0}")]
    Network(String),
}

impl GatewayError {
    /// Only the customer-not-found class warrants a scheduled re-attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::CustomerNotFound(_))
    }
}
