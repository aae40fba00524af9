//! Billing-specific error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid input to the price calculator.
///
/// Always surfaced synchronously to the caller and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// The regular contract price is negative.
    #[error("regular price cannot be negative, got {0}")]
    NegativeRegularPrice(Decimal),

    /// The one-time activation fee is negative.
    #[error("activation fee cannot be negative, got {0}")]
    NegativeActivationFee(Decimal),

    /// A custom duration shorter than the contract minimum was requested.
    #[error("custom duration of {custom} months is below the contract minimum of {minimum}")]
    DurationBelowMinimum { custom: u32, minimum: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn errors_carry_offending_values() {
        let err = BillingError::NegativeRegularPrice(dec!(-1));
        assert!(err.to_string().contains("-1"));

        let err = BillingError::DurationBelowMinimum {
            custom: 3,
            minimum: 6,
        };
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("6"));
    }
}
