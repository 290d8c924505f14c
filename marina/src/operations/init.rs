//! Data directory and database initialization.

use std::fs;
use std::path::PathBuf;

use crate::config::SlipSeed;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

use super::manage::seed_slips;
use super::BookingRules;

/// Options for initializing the marina data directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Path to the data directory.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a commented default `config.yaml`.
    pub create_config: bool,
    /// Slips to create in the new database.
    pub slips: Vec<SlipSeed>,
}

impl InitOptions {
    /// Creates options for `data_dir` with everything else off.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            slips: Vec::new(),
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a default configuration file is written.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Sets the slips to seed.
    #[must_use]
    pub fn with_slips(mut self, slips: Vec<SlipSeed>) -> Self {
        self.slips = slips;
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// The data directory had to be created.
    pub data_dir_created: bool,
    /// A database file was created.
    pub database_created: bool,
    /// A configuration file was written.
    pub config_created: bool,
    /// Number of slips seeded.
    pub slips_seeded: usize,
    /// The data directory used.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# Marina configuration

# pricing:
#   price_per_foot_cents: 1050
#   hookup_fee_cents: 1050      # per billed month
#   month_days: 30
#   turnover_days: 1            # departure day is not billed

# policy:
#   minimum_stay_days: 30
#   max_boat_length_feet: 50
#   size_classes: [26, 40, 50]

# confirmation:
#   prefix: SLP
#   max_attempts: 8

# slips:
#   - { size: 26, location: A-1 }
#   - { size: 40, location: B-1 }
#   - { size: 50, location: C-1 }

# maximum_lock_wait_seconds: 5
";

/// Creates the data directory and database and seeds slips.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the database exists and `overwrite` is
/// off, or any I/O, storage or seed validation error.
pub fn init_database(options: &InitOptions, rules: &BookingRules) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        slips_seeded: 0,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    let db_exists = db_path.exists();

    if db_exists && !options.overwrite {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                db_path.display()
            ),
        });
    }

    if db_exists {
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = PathBuf::from(format!("{}{suffix}", db_path.display()));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
    }

    let db = Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    result.slips_seeded = seed_slips(db.connection(), rules, &options.slips)?.len();

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    log::info!(
        "initialized {} with {} slip(s)",
        db_path.display(),
        result.slips_seeded
    );
    Ok(result)
}
