//! Work queue port.
//!
//! Scheduling contract for retryable mandate submissions. The queue owns the
//! single-delivery-in-flight guarantee: no two workers ever execute the same
//! request concurrently, and attempt N+1 is never delivered before attempt
//! N's delay has elapsed.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::MandateRequestId;
use crate::domain::mandate::MandateRequest;

/// Port for deferred redelivery of mandate requests.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Schedules a delivery no earlier than now plus `delay`.
    ///
    /// Delays are cooperative: the queue re-enqueues with a not-before time
    /// rather than parking a worker.
    async fn schedule(&self, request: MandateRequest, delay: Duration) -> Result<(), QueueError>;

    /// Drops any still-scheduled deliveries for the given request.
    ///
    /// Called on fatal outcomes so no stale attempt fires after the request
    /// reached a terminal state.
    async fn abort(&self, request_id: &MandateRequestId) -> Result<(), QueueError>;
}

/// Errors from the work queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("work queue is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn WorkQueue) {}
}
