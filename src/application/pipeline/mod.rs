//! Mandate activation pipeline.
//!
//! An asynchronous, independently retryable workflow: submit mandate
//! creation to the payment processor, then activate the payment method and
//! membership as a synchronous continuation of the success path. Transient
//! processor errors are re-scheduled on a fixed delay schedule up to a
//! bounded attempt count; everything else fails terminally and is recorded.

mod submit;
mod worker;

pub use submit::{SubmitMandateHandler, SubmitOutcome};
pub use worker::{MandateDispatcher, MandateWorker};
