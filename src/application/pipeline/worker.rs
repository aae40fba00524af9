//! Drivers that run the submit handler against a scheduling strategy.
//!
//! Two ways to consume [`SubmitOutcome`]s:
//!
//! - [`MandateWorker`] drives one request to completion inside a single
//!   task, suspending cooperatively between attempts. Suitable for
//!   embedders without a broker and for tests.
//! - [`MandateDispatcher`] couples the handler to a [`WorkQueue`], turning
//!   retry outcomes into scheduled redeliveries and fatal outcomes into
//!   aborts of any still-scheduled attempts.

use std::sync::Arc;

use crate::domain::mandate::MandateRequest;
use crate::ports::{QueueError, WorkQueue};

use super::{SubmitMandateHandler, SubmitOutcome};

/// Drives one mandate request to a terminal state in-task.
pub struct MandateWorker {
    handler: Arc<SubmitMandateHandler>,
}

impl MandateWorker {
    pub fn new(handler: Arc<SubmitMandateHandler>) -> Self {
        Self { handler }
    }

    /// Runs submission attempts until the request is terminal, waiting the
    /// scheduled delay between attempts.
    ///
    /// The wait is a task suspension, never a blocked thread: other work
    /// items on the same worker pool keep running during the delay.
    pub async fn run_to_completion(&self, request: &mut MandateRequest) -> SubmitOutcome {
        loop {
            match self.handler.handle(request).await {
                SubmitOutcome::Retry { delay } => tokio::time::sleep(delay).await,
                outcome => return outcome,
            }
        }
    }
}

/// Couples the submit handler to an external work queue.
pub struct MandateDispatcher {
    handler: Arc<SubmitMandateHandler>,
    queue: Arc<dyn WorkQueue>,
}

impl MandateDispatcher {
    pub fn new(handler: Arc<SubmitMandateHandler>, queue: Arc<dyn WorkQueue>) -> Self {
        Self { handler, queue }
    }

    /// Processes a single queue delivery.
    ///
    /// Retry outcomes are rescheduled on the queue with their not-before
    /// delay; terminal failures abort any leftover scheduled deliveries for
    /// the request.
    pub async fn process(&self, mut request: MandateRequest) -> Result<SubmitOutcome, QueueError> {
        let outcome = self.handler.handle(&mut request).await;
        match &outcome {
            SubmitOutcome::Retry { delay } => {
                self.queue.schedule(request, *delay).await?;
            }
            SubmitOutcome::Failed { .. } => {
                self.queue.abort(&request.request_id).await?;
            }
            _ => {}
        }
        Ok(outcome)
    }
}
