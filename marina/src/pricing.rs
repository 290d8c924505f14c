//! Stay pricing.
//!
//! A stay costs a per-foot base charge for the boat plus a utility hookup
//! fee for every billed month:
//!
//! ```text
//! cost = length_feet * price_per_foot + months * hookup_fee_per_month
//! ```
//!
//! Months are 30-day blocks. The departure day is a turnover day and is not
//! billed, so a stay of `days` days bills `ceil((days - turnover) / 30)`
//! months, with a minimum of one.
//!
//! All amounts are integer cents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An amount of money in cents.
///
/// # Examples
///
/// ```
/// use marina::Money;
///
/// let total = Money::from_cents(32_550);
/// assert_eq!(total.to_string(), "$325.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates an amount from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// Itemized cost of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Boat length times the per-foot price.
    pub base: Money,
    /// Billed months times the monthly hookup fee.
    pub hookup: Money,
    /// `base + hookup`.
    pub total: Money,
    /// Number of billed months.
    pub months: u32,
}

/// Pricing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Base charge per foot of boat length, in cents.
    pub price_per_foot_cents: i64,
    /// Utility hookup fee per billed month, in cents.
    pub hookup_fee_cents: i64,
    /// Days in a billing month.
    pub month_days: u32,
    /// Days at the end of a stay that are not billed.
    pub turnover_days: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            price_per_foot_cents: 1050,
            hookup_fee_cents: 1050,
            month_days: 30,
            turnover_days: 1,
        }
    }
}

/// Computes stay costs from a [`PricingPolicy`].
///
/// # Examples
///
/// ```
/// use marina::PricingCalculator;
///
/// let calc = PricingCalculator::default();
/// let quote = calc.cost(30, 1).unwrap();
/// assert_eq!(quote.total.to_string(), "$325.50");
///
/// assert_eq!(calc.months_for_days(31), 1);
/// assert_eq!(calc.months_for_days(62), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingCalculator {
    policy: PricingPolicy,
}

impl PricingCalculator {
    /// Creates a calculator for the given policy.
    #[must_use]
    pub const fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Number of billed months for a stay of `days` days.
    #[must_use]
    pub fn months_for_days(&self, days: i64) -> u32 {
        let month = i64::from(self.policy.month_days.max(1));
        let billable = days - i64::from(self.policy.turnover_days);
        if billable <= 0 {
            return 1;
        }
        let months = (billable + month - 1) / month;
        u32::try_from(months).unwrap_or(u32::MAX).max(1)
    }

    /// Computes the cost breakdown.
    ///
    /// Lengths and month counts are accepted as signed values so that bad
    /// input can be rejected rather than wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the length is not positive or
    /// `months` is less than one.
    pub fn cost(&self, length_feet: i64, months: i64) -> Result<CostBreakdown> {
        if length_feet <= 0 {
            return Err(Error::invalid_input(
                "length_feet",
                format!("boat length must be positive, got {length_feet}"),
            ));
        }
        if months < 1 {
            return Err(Error::invalid_input(
                "months",
                format!("at least one month is billed, got {months}"),
            ));
        }

        let billed_months = u32::try_from(months)
            .map_err(|_| Error::invalid_input("months", format!("{months} is out of range")))?;

        let base = length_feet
            .checked_mul(self.policy.price_per_foot_cents)
            .ok_or_else(|| Error::invalid_input("length_feet", "cost overflows"))?;
        let hookup = months
            .checked_mul(self.policy.hookup_fee_cents)
            .ok_or_else(|| Error::invalid_input("months", "cost overflows"))?;
        let total = base
            .checked_add(hookup)
            .ok_or_else(|| Error::invalid_input("length_feet", "cost overflows"))?;

        Ok(CostBreakdown {
            base: Money::from_cents(base),
            hookup: Money::from_cents(hookup),
            total: Money::from_cents(total),
            months: billed_months,
        })
    }

    /// Prices a stay of `days` days for a boat of `length_feet`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the length is not positive.
    pub fn cost_for_stay(&self, length_feet: u32, days: i64) -> Result<CostBreakdown> {
        self.cost(i64::from(length_feet), i64::from(self.months_for_days(days)))
    }
}
