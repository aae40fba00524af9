//! Adapters: concrete implementations of the ports.

pub mod events;
pub mod memory;
pub mod mollie;
pub mod queue;
