//! Clubbill - Membership Billing Core
//!
//! This crate implements the billing core of a club-membership platform:
//! recurring contract price quoting and the SEPA mandate activation pipeline.
//! It is embedded in-process by a surrounding application; persistence,
//! routing, and notification delivery remain external collaborators reached
//! through the ports in [`ports`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
