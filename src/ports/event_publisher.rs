//! Event publisher port.
//!
//! How the pipeline reports mandate facts without knowing the transport.
//! Delivery is at-least-once from the core's perspective; downstream
//! consumers must be idempotent on the mandate id.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mandate::MandateEvent;

/// Port for publishing mandate lifecycle facts.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single fact.
    async fn publish(&self, event: MandateEvent) -> Result<(), PublishError>;
}

/// Failure to hand a fact to the event sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event delivery failed: {reason}")]
pub struct PublishError {
    pub reason: String,
}

impl PublishError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
