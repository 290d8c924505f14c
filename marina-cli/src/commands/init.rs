//! Init command implementation.
//!
//! Explicitly initializes the data directory and database, seeding the
//! slips listed in configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_data_dir, shorten_path, GlobalOptions};
use clap::Parser;
use marina::database::DATABASE_FILE_NAME;
use marina::operations::{init_database, InitOptions};
use marina::BookingRules;

/// Initialize the marina data directory and database.
#[derive(Parser)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        let config = load_configuration(global)?;
        let slips = config.slips.clone().unwrap_or_default();

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize marina in: {}", shorten_path(&data_dir));

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if db_path.exists() && !self.overwrite {
                println!("  - ERROR: Database already exists (use --overwrite to replace)");
            } else {
                if db_path.exists() {
                    println!("  - Remove existing database");
                }
                println!("  - Create database: {}", db_path.display());
                println!("  - Seed {} slip(s)", slips.len());
            }

            if self.with_config {
                println!("  - Create configuration file (if missing)");
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_slips(slips);

        let result = init_database(&options, &BookingRules::from_config(&config))?;

        println!("Initialized marina in: {}", shorten_path(&result.data_dir));

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }

        println!("  - Seeded {} slip(s)", result.slips_seeded);

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
