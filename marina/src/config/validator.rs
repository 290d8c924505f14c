//! Configuration validation.
//!
//! Checks that every configured value is usable before any booking logic
//! reads it.

use crate::config::schema::{Config, ConfirmationConfig, PolicyConfig, PricingConfig, SlipSeed};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Longest accepted confirmation prefix.
const MAX_PREFIX_LEN: usize = 8;

/// Longest accepted slip location label.
const MAX_LOCATION_LEN: usize = 32;

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use marina::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref pricing) = config.pricing {
            Self::validate_pricing(pricing)?;
        }

        if let Some(ref policy) = config.policy {
            Self::validate_policy(policy)?;
        }

        if let Some(ref confirmation) = config.confirmation {
            Self::validate_confirmation(confirmation)?;
        }

        if let Some(ref slips) = config.slips {
            Self::validate_slips(slips, &config.size_classes())?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Self::error(
                    "maximum_lock_wait_seconds",
                    "Timeout must be greater than 0",
                ));
            }
        }

        Ok(())
    }

    fn validate_pricing(pricing: &PricingConfig) -> Result<()> {
        if let Some(price) = pricing.price_per_foot_cents {
            if price <= 0 {
                return Err(Self::error(
                    "pricing.price_per_foot_cents",
                    "Price must be greater than 0",
                ));
            }
        }

        if let Some(fee) = pricing.hookup_fee_cents {
            if fee <= 0 {
                return Err(Self::error(
                    "pricing.hookup_fee_cents",
                    "Fee must be greater than 0",
                ));
            }
        }

        if pricing.month_days == Some(0) {
            return Err(Self::error("pricing.month_days", "Must be at least 1"));
        }

        let month_days = pricing.month_days.unwrap_or(30);
        if let Some(turnover) = pricing.turnover_days {
            if turnover >= month_days {
                return Err(Self::error(
                    "pricing.turnover_days",
                    format!("Must be less than month_days ({month_days})"),
                ));
            }
        }

        Ok(())
    }

    fn validate_policy(policy: &PolicyConfig) -> Result<()> {
        if policy.minimum_stay_days == Some(0) {
            return Err(Self::error("policy.minimum_stay_days", "Must be at least 1"));
        }

        if policy.max_boat_length_feet == Some(0) {
            return Err(Self::error("policy.max_boat_length_feet", "Must be at least 1"));
        }

        if let Some(ref classes) = policy.size_classes {
            if classes.is_empty() {
                return Err(Self::error(
                    "policy.size_classes",
                    "At least one size class is required",
                ));
            }

            let mut seen = HashSet::new();
            for &class in classes {
                if class == 0 {
                    return Err(Self::error(
                        "policy.size_classes",
                        "Size classes must be positive",
                    ));
                }
                if !seen.insert(class) {
                    return Err(Self::error(
                        "policy.size_classes",
                        format!("Duplicate size class {class}"),
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_confirmation(confirmation: &ConfirmationConfig) -> Result<()> {
        if let Some(ref prefix) = confirmation.prefix {
            if prefix.len() > MAX_PREFIX_LEN {
                return Err(Self::error(
                    "confirmation.prefix",
                    format!("Cannot exceed {MAX_PREFIX_LEN} characters"),
                ));
            }
            if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(Self::error(
                    "confirmation.prefix",
                    "Only ASCII letters, digits and dashes are allowed",
                ));
            }
        }

        if confirmation.max_attempts == Some(0) {
            return Err(Self::error("confirmation.max_attempts", "Must be at least 1"));
        }

        Ok(())
    }

    fn validate_slips(slips: &[SlipSeed], size_classes: &[u32]) -> Result<()> {
        let mut locations = HashSet::new();

        for slip in slips {
            if !size_classes.contains(&slip.size) {
                return Err(Self::error(
                    "slips",
                    format!(
                        "Slip {} has size {} which is not a configured size class",
                        slip.location, slip.size
                    ),
                ));
            }

            let location = slip.location.trim();
            if location.is_empty() {
                return Err(Self::error("slips", "Slip location cannot be empty"));
            }
            if location.len() > MAX_LOCATION_LEN {
                return Err(Self::error(
                    "slips",
                    format!("Slip location cannot exceed {MAX_LOCATION_LEN} characters"),
                ));
            }
            if !locations.insert(location) {
                return Err(Self::error(
                    "slips",
                    format!("Duplicate slip location {location}"),
                ));
            }
        }

        Ok(())
    }

    fn error(field: &str, message: impl Into<String>) -> Error {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
