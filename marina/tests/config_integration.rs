//! Configuration system integration tests: file discovery, merging,
//! environment overrides and their effect on booking.
//!
//! Tests that touch environment variables are `#[serial]`.

mod common;

use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use common::{open, user};
use marina::config::{Config, ConfigBuilder, OutputFormat};
use marina::{BoatSelection, Error, Money, NewBoat};

/// Sets an environment variable for the guard's lifetime.
struct EnvGuard {
    key: &'static str,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &'static str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self { key, old_value }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(self.key, value),
            None => env::remove_var(self.key),
        }
    }
}

#[test]
fn test_project_file_overrides_user_file() {
    let data_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let nested = project.path().join("docks").join("east");
    fs::create_dir_all(&nested).unwrap();

    fs::write(
        data_dir.path().join("config.yaml"),
        "pricing:\n  price_per_foot_cents: 1200\n  hookup_fee_cents: 900\n",
    )
    .unwrap();
    fs::write(
        project.path().join("marina.yaml"),
        "pricing:\n  hookup_fee_cents: 1500\noutput_format: json\n",
    )
    .unwrap();
    fs::write(
        project.path().join("marina.local.yaml"),
        "policy:\n  minimum_stay_days: 14\n",
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .skip_env()
        .with_data_dir(data_dir.path())
        .with_working_dir(&nested)
        .build()
        .unwrap();

    let pricing = config.pricing_policy();
    assert_eq!(pricing.price_per_foot_cents, 1200);
    assert_eq!(pricing.hookup_fee_cents, 1500);
    assert_eq!(config.stay_policy().minimum_stay_days, 14);
    assert_eq!(config.output_format, Some(OutputFormat::Json));
}

#[test]
fn test_unknown_field_rejected_with_path() {
    let project = TempDir::new().unwrap();
    let path = project.path().join("marina.yaml");
    fs::write(&path, "pricing:\n  price_per_inch: 3\n").unwrap();

    let err = ConfigBuilder::new()
        .skip_env()
        .with_data_dir(project.path())
        .with_working_dir(project.path())
        .build()
        .unwrap_err();
    match err {
        Error::Configuration { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_invalid_values_rejected() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("marina.yaml"),
        "policy:\n  size_classes: [26, 26]\n",
    )
    .unwrap();

    let err = ConfigBuilder::new()
        .skip_env()
        .with_data_dir(project.path())
        .with_working_dir(project.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "policy.size_classes"));
}

#[test]
#[serial]
fn test_environment_beats_files() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("marina.yaml"),
        "policy:\n  minimum_stay_days: 14\n",
    )
    .unwrap();

    let _stay = EnvGuard::new("MARINA_MINIMUM_STAY_DAYS", "21");
    let _classes = EnvGuard::new("MARINA_SIZE_CLASSES", "30,60");

    let config = ConfigBuilder::new()
        .with_data_dir(project.path())
        .with_working_dir(project.path())
        .build()
        .unwrap();
    assert_eq!(config.stay_policy().minimum_stay_days, 21);
    assert_eq!(config.size_classes(), vec![30, 60]);
}

#[test]
#[serial]
fn test_malformed_environment_rejected() {
    let _guard = EnvGuard::new("MARINA_PRICE_PER_FOOT_CENTS", "ten dollars");
    let err = ConfigBuilder::new().skip_files().build().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_configured_policy_drives_booking() {
    let dir = TempDir::new().unwrap();
    let config: Config = serde_yaml::from_str(
        "pricing:\n  hookup_fee_cents: 2000\npolicy:\n  minimum_stay_days: 7\n  size_classes: [30, 60]\nslips:\n  - { size: 30, location: D-1 }\n",
    )
    .unwrap();
    let config = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(config)
        .build()
        .unwrap();

    let mut marina = open(dir.path(), config);
    let seeded = marina.seed_slips().unwrap();
    assert_eq!(seeded.len(), 1);

    let ctx = user(1);
    let boat = BoatSelection::New(NewBoat::new("Skiff", 20, 50).unwrap());
    let report = marina
        .check_availability(&ctx, "2026-03-01", "2026-03-08", 30, &boat)
        .unwrap();
    assert_eq!(report.candidate_slips.len(), 1);
    assert_eq!(report.estimate.total, Money::from_cents(20 * 1050 + 2000));

    let reservation = marina
        .confirm_reservation(&ctx, "2026-03-01", "2026-03-08", seeded[0].id, boat)
        .unwrap();
    assert_eq!(reservation.total(), Money::from_cents(20 * 1050 + 2000));

    let err = marina
        .check_availability(&ctx, "2026-03-01", "2026-03-08", 40, &BoatSelection::existing(reservation.boat_id()))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}
