//! Mandate request aggregate and lifecycle.
//!
//! A [`MandateRequest`] drives the asynchronous SEPA mandate activation
//! pipeline; [`MandateStatus`] is its state machine and [`MandateEvent`]
//! the facts published along the way.

mod events;
mod request;
mod status;

pub use events::{MandateEvent, MandateFailure};
pub use request::MandateRequest;
pub use status::MandateStatus;
