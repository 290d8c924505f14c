//! Utility functions for CLI operations.
//!
//! Data directory resolution, configuration loading, opening the booking
//! service and output formatting shared by the commands.

use crate::error::CliError;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use marina::config::OutputFormat;
use marina::database::DATABASE_FILE_NAME;
use marina::{
    BoatId, BoatSelection, Config, ConfigBuilder, ConfirmationCode, FixedClock, Marina, NewBoat,
    RequestContext, Reservation, Slip, UserId,
};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Identity the request is made as.
    pub user: Option<i64>,

    /// Pinned current date, `YYYY-MM-DD`.
    pub today: Option<String>,
}

impl GlobalOptions {
    /// The caller's request context.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` when no user was given.
    pub fn context(&self) -> Result<RequestContext, CliError> {
        self.user
            .map(|id| RequestContext::new(UserId::from(id)))
            .ok_or_else(|| {
                CliError::InvalidArguments(
                    "no user given (use --user or set MARINA_USER)".to_string(),
                )
            })
    }

    /// The pinned date, if any.
    ///
    /// # Errors
    ///
    /// Returns a library validation error for a malformed date.
    pub fn pinned_today(&self) -> Result<Option<NaiveDate>, CliError> {
        self.today
            .as_deref()
            .map(|text| marina::stay::parse_date("today", text))
            .transpose()
            .map_err(CliError::from)
    }
}

/// Parse a confirmation code argument.
pub fn parse_code(code: &str) -> Result<ConfirmationCode, CliError> {
    ConfirmationCode::new(code).map_err(|e| CliError::Library(e.into()))
}

/// Resolve the data directory: `--data-dir` / `MARINA_DATA_DIR`, else
/// `~/.marina`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.clone());
    }
    marina::database::resolve_data_dir()
        .map_err(|_| CliError::Config("Could not determine home directory".to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    let overrides = Config {
        maximum_lock_wait_seconds: global.busy_timeout.map(u64::from),
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Default::default()
    };

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the booking service.
///
/// A database created on the fly is seeded with the configured slips.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_marina(global: &GlobalOptions, config: Config) -> Result<Marina, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let existed = data_dir.join(DATABASE_FILE_NAME).exists();

    if !existed && config.disable_autoinit.unwrap_or(false) {
        return Err(CliError::NoDataDirectory);
    }

    let mut marina = Marina::open(&data_dir, config)?;
    if let Some(today) = global.pinned_today()? {
        marina = marina.with_clock(FixedClock(today));
    }

    if !existed {
        let seeded = marina.seed_slips()?;
        log::info!(
            "created database in {} with {} slip(s)",
            shorten_path(&data_dir),
            seeded.len()
        );
    }

    Ok(marina)
}

/// Boat selection flags shared by `availability` and `reserve`.
#[derive(Args, Debug, Clone)]
pub struct BoatArgs {
    /// Id of one of your registered boats
    #[arg(long, value_name = "ID", conflicts_with_all = ["new_boat_name", "new_boat_length"])]
    pub boat: Option<i64>,

    /// Name of a boat to register with this request
    #[arg(long, value_name = "NAME", requires = "new_boat_length")]
    pub new_boat_name: Option<String>,

    /// Length in feet of a boat not yet registered
    #[arg(long, value_name = "FEET")]
    pub new_boat_length: Option<u32>,
}

impl BoatArgs {
    /// Turns the flags into a selection. `default_name` stands in for a
    /// missing `--new-boat-name`; without it the name is required.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` when no boat was given, or a library
    /// validation error for a bad name or length.
    pub fn selection(
        &self,
        max_length_feet: u32,
        default_name: Option<&str>,
    ) -> Result<BoatSelection, CliError> {
        if let Some(id) = self.boat {
            return Ok(BoatSelection::Existing(BoatId::from(id)));
        }

        let Some(length) = self.new_boat_length else {
            return Err(CliError::InvalidArguments(
                "give --boat or --new-boat-length".to_string(),
            ));
        };
        let name = match (self.new_boat_name.as_deref(), default_name) {
            (Some(name), _) | (None, Some(name)) => name,
            (None, None) => {
                return Err(CliError::InvalidArguments(
                    "--new-boat-name is required with --new-boat-length".to_string(),
                ))
            }
        };

        Ok(BoatSelection::New(NewBoat::new(name, length, max_length_feet)?))
    }
}

/// Output format for listing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Format {
    /// Tab-separated table (human-readable)
    Human,
    /// JSON
    Json,
    /// CSV
    Csv,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => Format::Human,
            OutputFormat::Json => Format::Json,
            OutputFormat::Csv => Format::Csv,
        }
    }
}

/// The `--format` flag, else the configured `output_format`.
pub fn resolve_format(flag: Option<Format>, config: &Config) -> Format {
    flag.unwrap_or_else(|| config.output_format.unwrap_or_default().into())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// JSON object for a reservation.
pub fn reservation_json(r: &Reservation) -> serde_json::Value {
    serde_json::json!({
        "code": r.code().as_str(),
        "slip_id": r.slip_id().value(),
        "boat_id": r.boat_id().value(),
        "start_date": r.stay().start().to_string(),
        "end_date": r.stay().end().to_string(),
        "months": r.months(),
        "total_cents": r.total().cents(),
        "total": r.total().to_string(),
        "status": r.status().to_string(),
        "created_at": format_timestamp(r.created_at()),
        "updated_at": format_timestamp(r.updated_at()),
    })
}

/// One table line for a slip.
pub fn slip_row(slip: &Slip) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        slip.id,
        slip.size_feet,
        slip.location,
        if slip.in_service { "yes" } else { "no" }
    )
}

/// Header matching [`slip_row`].
pub const SLIP_HEADER: &str = "ID\tSIZE\tLOCATION\tIN_SERVICE";
