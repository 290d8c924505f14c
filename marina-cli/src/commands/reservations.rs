//! Reservations command implementation.
//!
//! Lists the caller's reservations, newest stay first, as a table, JSON or
//! CSV.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_marina, reservation_json, resolve_format, Format,
    GlobalOptions,
};
use clap::Args;
use marina::{Reservation, ReservationStatus};
use std::io::Write;

/// Column headers for table and CSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "code",
    "slip",
    "boat",
    "start",
    "end",
    "months",
    "total",
    "status",
];

/// List your reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<Format>,

    /// Only show reservations with this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ReservationStatus>)
            .transpose()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let marina = open_marina(global, load_configuration(global)?)?;
        let mut reservations = marina.list_reservations(&ctx)?;

        if let Some(status) = status {
            reservations.retain(|r| r.status() == status);
        }

        match resolve_format(self.format, marina.config()) {
            Format::Human => format_as_table(&reservations)?,
            Format::Json => format_as_json(&reservations)?,
            Format::Csv => format_as_csv(&reservations)?,
        }

        Ok(())
    }
}

fn fields(r: &Reservation) -> [String; 8] {
    [
        r.code().to_string(),
        r.slip_id().to_string(),
        r.boat_id().to_string(),
        r.stay().start().to_string(),
        r.stay().end().to_string(),
        r.months().to_string(),
        r.total().to_string(),
        r.status().to_string(),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(handle, "{}", fields(res).join("\t"))?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations.iter().map(reservation_json).collect();
    serde_json::to_writer_pretty(&mut handle, &json_data)?;
    writeln!(handle)?;

    Ok(())
}

/// Format reservations as CSV, with the creation time as a last column.
fn format_as_csv(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    let mut header: Vec<&str> = COLUMN_HEADERS.to_vec();
    header.push("created_at");
    writer.write_record(&header)?;

    for res in reservations {
        let mut record = fields(res).to_vec();
        record.push(format_timestamp(res.created_at()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
