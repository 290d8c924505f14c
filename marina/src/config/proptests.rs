//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, PolicyConfig, PricingConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn pricing_strategy() -> impl Strategy<Value = PricingConfig> {
    (
        prop::option::of(1i64..=10_000),
        prop::option::of(1i64..=10_000),
    )
        .prop_map(|(price_per_foot_cents, hookup_fee_cents)| PricingConfig {
            price_per_foot_cents,
            hookup_fee_cents,
            ..Default::default()
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(pricing_strategy()),
        prop::option::of(1u32..=365),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..=600),
    )
        .prop_map(|(pricing, minimum_stay_days, autoinit, lock_wait)| Config {
            pricing,
            policy: minimum_stay_days.map(|days| PolicyConfig {
                minimum_stay_days: Some(days),
                ..Default::default()
            }),
            disable_autoinit: autoinit,
            maximum_lock_wait_seconds: lock_wait,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins field by field
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.disable_autoinit,
            high.disable_autoinit.or(low.disable_autoinit)
        );
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );

        let field = |c: &Config| c.pricing.as_ref().and_then(|p| p.hookup_fee_cents);
        prop_assert_eq!(field(&result), field(&high).or_else(|| field(&low)));
    }

    // Empty config is the identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging a config into itself changes nothing
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Generated configs only hold legal values
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    // Non-positive prices are always rejected
    #[test]
    fn non_positive_price_rejected(price in i64::MIN..=0) {
        let config = Config {
            pricing: Some(PricingConfig {
                price_per_foot_cents: Some(price),
                ..Default::default()
            }),
            ..Default::default()
        };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
