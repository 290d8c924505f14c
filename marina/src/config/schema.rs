//! Configuration schema definitions.
//!
//! Every field is optional so that sources can be layered; the accessor
//! methods on [`Config`] fill in the built-in defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::boat::DEFAULT_MAX_BOAT_LENGTH_FEET;
use crate::confirmation::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PREFIX};
use crate::pricing::PricingPolicy;
use crate::stay::{StayPolicy, DEFAULT_MINIMUM_STAY_DAYS};

/// Slip size classes offered when none are configured.
pub const DEFAULT_SIZE_CLASSES: [u32; 3] = [26, 40, 50];

/// Default lock wait, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use marina::config::{Config, PricingConfig};
///
/// let config = Config {
///     pricing: Some(PricingConfig {
///         hookup_fee_cents: Some(2000),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.pricing_policy().hookup_fee_cents, 2000);
/// assert_eq!(config.pricing_policy().price_per_foot_cents, 1050);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pricing constants.
    pub pricing: Option<PricingConfig>,

    /// Booking policy.
    pub policy: Option<PolicyConfig>,

    /// Confirmation code settings.
    pub confirmation: Option<ConfirmationConfig>,

    /// Slips created by `init`.
    pub slips: Option<Vec<SlipSeed>>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective pricing policy.
    #[must_use]
    pub fn pricing_policy(&self) -> PricingPolicy {
        let defaults = PricingPolicy::default();
        let Some(pricing) = &self.pricing else {
            return defaults;
        };
        PricingPolicy {
            price_per_foot_cents: pricing
                .price_per_foot_cents
                .unwrap_or(defaults.price_per_foot_cents),
            hookup_fee_cents: pricing
                .hookup_fee_cents
                .unwrap_or(defaults.hookup_fee_cents),
            month_days: pricing.month_days.unwrap_or(defaults.month_days),
            turnover_days: pricing.turnover_days.unwrap_or(defaults.turnover_days),
        }
    }

    /// Effective stay policy.
    #[must_use]
    pub fn stay_policy(&self) -> StayPolicy {
        StayPolicy {
            minimum_stay_days: self
                .policy
                .as_ref()
                .and_then(|p| p.minimum_stay_days)
                .unwrap_or(DEFAULT_MINIMUM_STAY_DAYS),
        }
    }

    /// Longest boat accepted, in feet.
    #[must_use]
    pub fn max_boat_length_feet(&self) -> u32 {
        self.policy
            .as_ref()
            .and_then(|p| p.max_boat_length_feet)
            .unwrap_or(DEFAULT_MAX_BOAT_LENGTH_FEET)
    }

    /// Offered slip size classes, ascending.
    #[must_use]
    pub fn size_classes(&self) -> Vec<u32> {
        let mut classes = self
            .policy
            .as_ref()
            .and_then(|p| p.size_classes.clone())
            .unwrap_or_else(|| DEFAULT_SIZE_CLASSES.to_vec());
        classes.sort_unstable();
        classes
    }

    /// Confirmation code prefix.
    #[must_use]
    pub fn confirmation_prefix(&self) -> &str {
        self.confirmation
            .as_ref()
            .and_then(|c| c.prefix.as_deref())
            .unwrap_or(DEFAULT_PREFIX)
    }

    /// Number of confirmation codes tried before giving up.
    #[must_use]
    pub fn max_code_attempts(&self) -> u32 {
        self.confirmation
            .as_ref()
            .and_then(|c| c.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Bound on database lock waits.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }
}

/// Pricing constants, in integer cents.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Base charge per foot of boat length.
    pub price_per_foot_cents: Option<i64>,

    /// Utility hookup fee per billed month.
    pub hookup_fee_cents: Option<i64>,

    /// Days in a billing month.
    pub month_days: Option<u32>,

    /// Unbilled days at the end of a stay.
    pub turnover_days: Option<u32>,
}

/// Booking policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Shortest stay accepted, in days.
    pub minimum_stay_days: Option<u32>,

    /// Longest boat accepted, in feet.
    pub max_boat_length_feet: Option<u32>,

    /// Offered slip size classes, in feet.
    pub size_classes: Option<Vec<u32>>,
}

/// Confirmation code settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfirmationConfig {
    /// Prefix placed before the random part, e.g. `SLP`.
    pub prefix: Option<String>,

    /// Codes tried before giving up on a collision streak.
    pub max_attempts: Option<u32>,
}

/// A slip to create when initializing a database.
///
/// # Examples
///
/// ```
/// use marina::config::SlipSeed;
///
/// let seed: SlipSeed = serde_yaml::from_str("size: 40\nlocation: B-12").unwrap();
/// assert_eq!(seed.size, 40);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SlipSeed {
    /// Size class in feet.
    pub size: u32,

    /// Dock/position label.
    pub location: String,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use marina::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Human,
    /// JSON output.
    Json,
    /// CSV output.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}
