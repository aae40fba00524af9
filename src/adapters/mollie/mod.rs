//! Mollie payment processor adapters.

mod gateway;
mod mock;

pub use gateway::MollieGateway;
pub use mock::{GatewayCall, MockMandateGateway};
