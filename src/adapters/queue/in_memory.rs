//! In-memory implementation of the work queue port.
//!
//! Honors not-before times on the tokio clock, so tests under paused time
//! can assert the exact delay schedule. Single delivery in flight holds as
//! long as one consumer drives [`InMemoryWorkQueue::next_ready`]; a
//! brokered deployment replaces this adapter, not the pipeline.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::domain::foundation::MandateRequestId;
use crate::domain::mandate::MandateRequest;
use crate::ports::{QueueError, WorkQueue};

struct ScheduledDelivery {
    ready_at: Instant,
    request: MandateRequest,
}

/// Delay queue holding scheduled mandate request deliveries.
#[derive(Default)]
pub struct InMemoryWorkQueue {
    inner: Mutex<Vec<ScheduledDelivery>>,
}

impl InMemoryWorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deliveries still scheduled.
    pub fn scheduled_count(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Waits for the earliest scheduled delivery to become ready and takes
    /// it. Returns `None` when nothing is scheduled.
    pub async fn next_ready(&self) -> Option<MandateRequest> {
        loop {
            let earliest = self
                .inner
                .lock()
                .unwrap()
                .iter()
                .map(|delivery| delivery.ready_at)
                .min();

            let ready_at = earliest?;
            tokio::time::sleep_until(ready_at).await;

            // The delivery may have been aborted while we slept.
            let mut deliveries = self.inner.lock().unwrap();
            let now = Instant::now();
            if let Some(index) = deliveries
                .iter()
                .position(|delivery| delivery.ready_at <= now)
            {
                return Some(deliveries.remove(index).request);
            }
        }
    }
}

#[async_trait]
impl WorkQueue for InMemoryWorkQueue {
    async fn schedule(&self, request: MandateRequest, delay: Duration) -> Result<(), QueueError> {
        self.inner.lock().unwrap().push(ScheduledDelivery {
            ready_at: Instant::now() + delay,
            request,
        });
        Ok(())
    }

    async fn abort(&self, request_id: &MandateRequestId) -> Result<(), QueueError> {
        self.inner
            .lock()
            .unwrap()
            .retain(|delivery| delivery.request.request_id != *request_id);
        Ok(())
    }
}
