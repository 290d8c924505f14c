//! Environment variable handling for configuration overrides.
//!
//! `MARINA_*` variables override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use marina::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong type.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("MARINA_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("MARINA_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("MARINA_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("MARINA_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("MARINA_OUTPUT_FORMAT") {
            config.output_format = Some(val.parse::<OutputFormat>().map_err(|message| {
                Error::Validation {
                    field: "MARINA_OUTPUT_FORMAT".into(),
                    message,
                }
            })?);
        }

        Self::apply_pricing_overrides(config)?;
        Self::apply_policy_overrides(config)?;

        if let Ok(prefix) = env::var("MARINA_CONFIRMATION_PREFIX") {
            config
                .confirmation
                .get_or_insert_with(Default::default)
                .prefix = Some(prefix);
        }

        Ok(())
    }

    fn apply_pricing_overrides(config: &mut Config) -> Result<()> {
        let mut pricing = config.pricing.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("MARINA_PRICE_PER_FOOT_CENTS") {
            pricing.price_per_foot_cents =
                Some(Self::parse_number("MARINA_PRICE_PER_FOOT_CENTS", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("MARINA_HOOKUP_FEE_CENTS") {
            pricing.hookup_fee_cents = Some(Self::parse_number("MARINA_HOOKUP_FEE_CENTS", &val)?);
            modified = true;
        }

        if modified {
            config.pricing = Some(pricing);
        }
        Ok(())
    }

    fn apply_policy_overrides(config: &mut Config) -> Result<()> {
        let mut policy = config.policy.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("MARINA_MINIMUM_STAY_DAYS") {
            policy.minimum_stay_days = Some(Self::parse_number("MARINA_MINIMUM_STAY_DAYS", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("MARINA_MAX_BOAT_LENGTH_FEET") {
            policy.max_boat_length_feet =
                Some(Self::parse_number("MARINA_MAX_BOAT_LENGTH_FEET", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("MARINA_SIZE_CLASSES") {
            policy.size_classes = Some(Self::parse_size_classes(&val)?);
            modified = true;
        }

        if modified {
            config.policy = Some(policy);
        }
        Ok(())
    }

    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Invalid number: '{s}'"),
        })
    }

    /// Parses a comma-separated list such as `26,40,50`.
    fn parse_size_classes(s: &str) -> Result<Vec<u32>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Self::parse_number("MARINA_SIZE_CLASSES", part))
            .collect()
    }
}
