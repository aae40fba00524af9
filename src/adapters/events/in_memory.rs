//! In-memory implementation of the event publisher port.
//!
//! Records published facts for inspection. Used in tests and by embedders
//! that consume events in-process.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::mandate::MandateEvent;
use crate::ports::{EventPublisher, PublishError};

/// Event publisher that appends facts to an in-memory log.
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<MandateEvent>>,
    fail_next: Mutex<bool>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next publish call fail, for sink-outage tests.
    pub fn fail_next_publish(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Facts published so far, in order.
    pub fn published(&self) -> Vec<MandateEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: MandateEvent) -> Result<(), PublishError> {
        let mut fail_next = self.fail_next.lock().unwrap();
        if *fail_next {
            *fail_next = false;
            return Err(PublishError::new("simulated sink outage"));
        }
        drop(fail_next);

        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
