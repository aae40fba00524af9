//! Contract price calculation.
//!
//! Pure pricing of membership contracts over their minimum or a custom
//! duration: per-cycle recurring cost, proration of partial periods, average
//! monthly price, and savings against a hypothetical pay-monthly contract.

mod calculator;
mod cycle;
mod errors;
mod quote;

pub use calculator::{PriceCalculator, QuoteRequest, SurchargePolicy};
pub use cycle::BillingCycle;
pub use errors::BillingError;
pub use quote::{BillingQuote, RecurringBreakdown};
