//! Billing cycle definitions.
//!
//! The recurrence unit at which a contract's regular price is charged.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Recurrence unit for a membership contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// Charged every month. Never prorated.
    Monthly,

    /// Charged every three months. Partial quarters prorated per month.
    Quarterly,

    /// Charged every twelve months. Partial years prorated per month.
    Yearly,
}

impl BillingCycle {
    /// Number of months covered by one charge of this cycle.
    pub fn months_per_cycle(&self) -> u32 {
        match self {
            BillingCycle::Monthly => 1,
            BillingCycle::Quarterly => 3,
            BillingCycle::Yearly => 12,
        }
    }

    /// Returns the display name for this cycle.
    pub fn display_name(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(BillingCycle::Monthly),
            "quarterly" => Ok(BillingCycle::Quarterly),
            "yearly" => Ok(BillingCycle::Yearly),
            other => Err(format!("unknown billing cycle '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_per_cycle_matches_calendar() {
        assert_eq!(BillingCycle::Monthly.months_per_cycle(), 1);
        assert_eq!(BillingCycle::Quarterly.months_per_cycle(), 3);
        assert_eq!(BillingCycle::Yearly.months_per_cycle(), 12);
    }

    #[test]
    fn cycle_serializes_lowercase() {
        let json = serde_json::to_string(&BillingCycle::Quarterly).unwrap();
        assert_eq!(json, "\"quarterly\"");
    }

    #[test]
    fn cycle_parses_case_insensitively() {
        assert_eq!("Yearly".parse::<BillingCycle>(), Ok(BillingCycle::Yearly));
        assert!("weekly".parse::<BillingCycle>().is_err());
    }
}
