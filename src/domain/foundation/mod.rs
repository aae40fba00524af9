//! Foundation value objects shared across the domain.
//!
//! Strongly-typed identifiers, timestamps, validation errors, and the
//! state machine trait used by lifecycle status enums.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{CustomerId, MandateId, MandateRequestId, MemberId, PaymentMethodId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
