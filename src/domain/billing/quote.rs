//! Billing quote value objects.
//!
//! A [`BillingQuote`] is produced once per pricing request and never mutated.
//! All monetary fields are `Decimal`; reported sub-totals are rounded to two
//! decimals while the grand total is rounded exactly once from unrounded
//! intermediates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BillingCycle;

/// Cycle-specific recurring cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cycle", rename_all = "lowercase")]
pub enum RecurringBreakdown {
    /// Monthly contracts: price times duration, no proration.
    Monthly {
        months: u32,
        monthly_price: Decimal,
        recurring_total: Decimal,
    },

    /// Quarterly contracts: full quarters at the quarterly price plus a
    /// per-month prorated remainder.
    Quarterly {
        full_quarters: u32,
        remainder_months: u32,
        quarterly_price: Decimal,
        monthly_equivalent: Decimal,
        recurring_total: Decimal,
    },

    /// Yearly contracts: full years at the yearly price plus a per-month
    /// prorated remainder.
    Yearly {
        full_years: u32,
        remainder_months: u32,
        yearly_price: Decimal,
        monthly_equivalent: Decimal,
        recurring_total: Decimal,
    },
}

impl RecurringBreakdown {
    /// Reported recurring total (rounded to two decimals).
    pub fn recurring_total(&self) -> Decimal {
        match self {
            RecurringBreakdown::Monthly {
                recurring_total, ..
            }
            | RecurringBreakdown::Quarterly {
                recurring_total, ..
            }
            | RecurringBreakdown::Yearly {
                recurring_total, ..
            } => *recurring_total,
        }
    }
}

/// Immutable result of a contract pricing request.
///
/// # Invariants
///
/// - `actual_duration_months >= minimum_duration_months`
/// - all monetary inputs are non-negative
/// - `total_price` = activation fee + recurring total, rounded once
/// - `savings_vs_monthly` is `None` exactly for monthly contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingQuote {
    /// One-time activation fee charged up front.
    pub activation_fee: Decimal,

    /// Regular price charged once per billing cycle.
    pub regular_price: Decimal,

    /// Recurrence unit of the contract.
    pub billing_cycle: BillingCycle,

    /// Contractual minimum duration in months.
    pub minimum_duration_months: u32,

    /// Duration the quote was computed for (custom duration if supplied,
    /// otherwise the minimum).
    pub actual_duration_months: u32,

    /// Cycle-specific recurring cost breakdown.
    pub recurring_breakdown: RecurringBreakdown,

    /// Activation fee plus recurring total, rounded to two decimals.
    pub total_price: Decimal,

    /// Total price divided by duration (zero for zero-month quotes).
    pub average_monthly_price: Decimal,

    /// Savings against a hypothetical pay-monthly contract. `None` for
    /// monthly contracts; may be zero or negative depending on the
    /// configured surcharge policy.
    pub savings_vs_monthly: Option<Decimal>,
}
