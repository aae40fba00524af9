//! Domain layer: pure business rules, no I/O.

pub mod billing;
pub mod foundation;
pub mod mandate;
