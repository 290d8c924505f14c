//! Configuration merging and precedence handling.
//!
//! Nested sections merge field by field; the slip seed list is replaced
//! as a whole.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, ConfirmationConfig, PolicyConfig, PricingConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use marina::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - `pricing`, `policy`, `confirmation`: field-by-field merge
    /// - `size_classes`, `slips`: complete replacement
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_pricing) = source.pricing {
            target.pricing = Some(match &target.pricing {
                Some(target_pricing) => Self::merge_pricing(target_pricing, source_pricing),
                None => source_pricing.clone(),
            });
        }

        if let Some(ref source_policy) = source.policy {
            target.policy = Some(match &target.policy {
                Some(target_policy) => Self::merge_policy(target_policy, source_policy),
                None => source_policy.clone(),
            });
        }

        if let Some(ref source_confirmation) = source.confirmation {
            target.confirmation = Some(match &target.confirmation {
                Some(target_confirmation) => {
                    Self::merge_confirmation(target_confirmation, source_confirmation)
                }
                None => source_confirmation.clone(),
            });
        }

        if source.slips.is_some() {
            target.slips.clone_from(&source.slips);
        }
    }

    fn merge_pricing(target: &PricingConfig, source: &PricingConfig) -> PricingConfig {
        PricingConfig {
            price_per_foot_cents: source.price_per_foot_cents.or(target.price_per_foot_cents),
            hookup_fee_cents: source.hookup_fee_cents.or(target.hookup_fee_cents),
            month_days: source.month_days.or(target.month_days),
            turnover_days: source.turnover_days.or(target.turnover_days),
        }
    }

    fn merge_policy(target: &PolicyConfig, source: &PolicyConfig) -> PolicyConfig {
        PolicyConfig {
            minimum_stay_days: source.minimum_stay_days.or(target.minimum_stay_days),
            max_boat_length_feet: source.max_boat_length_feet.or(target.max_boat_length_feet),
            size_classes: source
                .size_classes
                .clone()
                .or_else(|| target.size_classes.clone()),
        }
    }

    fn merge_confirmation(
        target: &ConfirmationConfig,
        source: &ConfirmationConfig,
    ) -> ConfirmationConfig {
        ConfirmationConfig {
            prefix: source.prefix.clone().or_else(|| target.prefix.clone()),
            max_attempts: source.max_attempts.or(target.max_attempts),
        }
    }
}
