//! Billing configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::billing::SurchargePolicy;

/// Billing configuration (surcharge policy for savings estimates)
///
/// The markups represent the typical monthly surcharge assumed when
/// estimating what a quarterly or yearly contract would cost on a monthly
/// cycle. They are business policy, not a market fact, so they live here
/// rather than in the calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Assumed monthly surcharge vs. quarterly contracts (default 5%)
    #[serde(default = "default_quarterly_markup")]
    pub quarterly_monthly_markup: Decimal,

    /// Assumed monthly surcharge vs. yearly contracts (default 15%)
    #[serde(default = "default_yearly_markup")]
    pub yearly_monthly_markup: Decimal,
}

fn default_quarterly_markup() -> Decimal {
    dec!(0.05)
}

fn default_yearly_markup() -> Decimal {
    dec!(0.15)
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            quarterly_monthly_markup: default_quarterly_markup(),
            yearly_monthly_markup: default_yearly_markup(),
        }
    }
}

impl BillingConfig {
    /// Surcharge policy for the price calculator
    pub fn surcharge_policy(&self) -> SurchargePolicy {
        SurchargePolicy {
            quarterly_markup: self.quarterly_monthly_markup,
            yearly_markup: self.yearly_monthly_markup,
        }
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quarterly_monthly_markup < Decimal::ZERO
            || self.yearly_monthly_markup < Decimal::ZERO
        {
            return Err(ValidationError::NegativeMarkup);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_constants() {
        let config = BillingConfig::default();
        assert_eq!(config.quarterly_monthly_markup, dec!(0.05));
        assert_eq!(config.yearly_monthly_markup, dec!(0.15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_markup_is_rejected() {
        let config = BillingConfig {
            quarterly_monthly_markup: dec!(-0.05),
            ..BillingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn converts_to_surcharge_policy() {
        let config = BillingConfig {
            quarterly_monthly_markup: dec!(0.10),
            yearly_monthly_markup: dec!(0.20),
        };
        let policy = config.surcharge_policy();
        assert_eq!(policy.quarterly_markup, dec!(0.10));
        assert_eq!(policy.yearly_markup, dec!(0.20));
    }
}
