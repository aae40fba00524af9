//! Contract price calculator.
//!
//! Pure computation of the total cost of a membership contract over its
//! minimum (or a custom) duration. No side effects, referentially
//! transparent, safe for unrestricted concurrent use.
//!
//! # Rounding
//!
//! Sub-totals are rounded to two decimals for reporting only. The grand
//! total is computed from the unrounded recurring total plus the activation
//! fee and rounded exactly once, so rounding error never compounds.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::{BillingCycle, BillingError, BillingQuote, RecurringBreakdown};

/// Markup applied to the per-month equivalent price when estimating what the
/// same contract would cost on a monthly cycle.
///
/// These are assumed business policy, not a market fact; defaults mirror the
/// typical surcharge of shorter billing cycles (5% quarterly, 15% yearly)
/// and are overridable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurchargePolicy {
    /// Monthly surcharge assumed when comparing against quarterly contracts.
    pub quarterly_markup: Decimal,

    /// Monthly surcharge assumed when comparing against yearly contracts.
    pub yearly_markup: Decimal,
}

impl SurchargePolicy {
    /// Markup for the given cycle; monthly contracts have none.
    pub fn markup_for(&self, cycle: BillingCycle) -> Decimal {
        match cycle {
            BillingCycle::Monthly => Decimal::ZERO,
            BillingCycle::Quarterly => self.quarterly_markup,
            BillingCycle::Yearly => self.yearly_markup,
        }
    }
}

impl Default for SurchargePolicy {
    fn default() -> Self {
        Self {
            quarterly_markup: dec!(0.05),
            yearly_markup: dec!(0.15),
        }
    }
}

/// A contract pricing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Price charged once per billing cycle.
    pub regular_price: Decimal,

    /// Recurrence unit of the contract.
    pub billing_cycle: BillingCycle,

    /// Contractual minimum duration in months.
    pub minimum_duration_months: u32,

    /// One-time activation fee (defaults to zero).
    pub activation_fee: Decimal,

    /// Optional custom duration; must be at least the minimum.
    pub custom_duration_months: Option<u32>,
}

impl QuoteRequest {
    /// Creates a request with no activation fee and the minimum duration.
    pub fn new(
        regular_price: Decimal,
        billing_cycle: BillingCycle,
        minimum_duration_months: u32,
    ) -> Self {
        Self {
            regular_price,
            billing_cycle,
            minimum_duration_months,
            activation_fee: Decimal::ZERO,
            custom_duration_months: None,
        }
    }

    /// Sets the one-time activation fee.
    pub fn with_activation_fee(mut self, fee: Decimal) -> Self {
        self.activation_fee = fee;
        self
    }

    /// Prices the contract over a custom duration instead of the minimum.
    pub fn with_custom_duration(mut self, months: u32) -> Self {
        self.custom_duration_months = Some(months);
        self
    }
}

/// Stateless contract price calculator.
#[derive(Debug, Clone, Default)]
pub struct PriceCalculator {
    policy: SurchargePolicy,
}

impl PriceCalculator {
    /// Creates a calculator with the given surcharge policy.
    pub fn new(policy: SurchargePolicy) -> Self {
        Self { policy }
    }

    /// Computes the total contract cost over the effective duration.
    ///
    /// The effective duration is the custom duration if supplied, otherwise
    /// the contractual minimum.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] when the regular price or activation fee is
    /// negative, or when a custom duration below the minimum is requested.
    pub fn calculate_total_price(
        &self,
        request: &QuoteRequest,
    ) -> Result<BillingQuote, BillingError> {
        if request.regular_price < Decimal::ZERO {
            return Err(BillingError::NegativeRegularPrice(request.regular_price));
        }
        if request.activation_fee < Decimal::ZERO {
            return Err(BillingError::NegativeActivationFee(request.activation_fee));
        }
        if let Some(custom) = request.custom_duration_months {
            if custom < request.minimum_duration_months {
                return Err(BillingError::DurationBelowMinimum {
                    custom,
                    minimum: request.minimum_duration_months,
                });
            }
        }

        let duration = request
            .custom_duration_months
            .unwrap_or(request.minimum_duration_months);

        let (breakdown, recurring_exact) =
            recurring_cost(request.regular_price, request.billing_cycle, duration);

        // One rounding step for the grand total; sub-totals were rounded
        // for reporting only.
        let total_price = round_money(recurring_exact + request.activation_fee);

        let average_monthly_price = if duration == 0 {
            Decimal::ZERO
        } else {
            round_money(total_price / Decimal::from(duration))
        };

        let savings_vs_monthly = match request.billing_cycle {
            BillingCycle::Monthly => None,
            cycle => Some(self.savings_vs_monthly(
                request.regular_price,
                cycle,
                duration,
                recurring_exact,
            )),
        };

        Ok(BillingQuote {
            activation_fee: request.activation_fee,
            regular_price: request.regular_price,
            billing_cycle: request.billing_cycle,
            minimum_duration_months: request.minimum_duration_months,
            actual_duration_months: duration,
            recurring_breakdown: breakdown,
            total_price,
            average_monthly_price,
            savings_vs_monthly,
        })
    }

    /// Savings against a hypothetical pay-monthly contract.
    ///
    /// The monthly comparison price is the per-month equivalent inflated by
    /// the configured surcharge markup. Not clamped: a policy without a real
    /// discount reports zero or negative savings as-is.
    fn savings_vs_monthly(
        &self,
        regular_price: Decimal,
        cycle: BillingCycle,
        duration_months: u32,
        recurring_exact: Decimal,
    ) -> Decimal {
        let monthly_equivalent = regular_price / Decimal::from(cycle.months_per_cycle());
        let markup = self.policy.markup_for(cycle);
        let hypothetical = monthly_equivalent * (Decimal::ONE + markup) * Decimal::from(duration_months);
        round_money(hypothetical - recurring_exact)
    }
}

/// Recurring cost over the duration: reporting breakdown plus the unrounded
/// total used for the final sum.
fn recurring_cost(
    regular_price: Decimal,
    cycle: BillingCycle,
    duration_months: u32,
) -> (RecurringBreakdown, Decimal) {
    let months_per_cycle = cycle.months_per_cycle();
    let full_periods = duration_months / months_per_cycle;
    let remainder_months = duration_months % months_per_cycle;

    // Partial periods prorate at a flat per-month fraction of the cycle
    // price, unrounded mid-calculation.
    let monthly_equivalent = regular_price / Decimal::from(months_per_cycle);
    let recurring_exact = Decimal::from(full_periods) * regular_price
        + Decimal::from(remainder_months) * monthly_equivalent;

    let breakdown = match cycle {
        BillingCycle::Monthly => RecurringBreakdown::Monthly {
            months: duration_months,
            monthly_price: round_money(regular_price),
            recurring_total: round_money(recurring_exact),
        },
        BillingCycle::Quarterly => RecurringBreakdown::Quarterly {
            full_quarters: full_periods,
            remainder_months,
            quarterly_price: round_money(regular_price),
            monthly_equivalent: round_money(monthly_equivalent),
            recurring_total: round_money(recurring_exact),
        },
        BillingCycle::Yearly => RecurringBreakdown::Yearly {
            full_years: full_periods,
            remainder_months,
            yearly_price: round_money(regular_price),
            monthly_equivalent: round_money(monthly_equivalent),
            recurring_total: round_money(recurring_exact),
        },
    };

    (breakdown, recurring_exact)
}

/// Rounds to two decimals, ties away from zero (cash rounding).
fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
