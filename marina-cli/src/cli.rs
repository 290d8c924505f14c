//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, BoatCommand, CancelCommand, CompleteElapsedCommand, CompletionsCommand,
    InitCommand, QuoteCommand, RescheduleCommand, ReservationsCommand, ReserveCommand,
    ShowCommand, SlipCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for marina slip availability and reservations.
#[derive(Parser)]
#[command(name = "marina")]
#[command(version, about = "Book marina slips for boats", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "MARINA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "MARINA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "MARINA_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// User id to act as
    #[arg(long, value_name = "ID", global = true, env = "MARINA_USER")]
    pub user: Option<i64>,

    /// Pin the current date (YYYY-MM-DD). For test harnesses only; hidden
    /// from help.
    #[arg(long, value_name = "DATE", global = true, env = "MARINA_TODAY", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage slips
    Slip(SlipCommand),

    /// Manage your boats
    Boat(BoatCommand),

    /// List slips free for a stay
    Availability(AvailabilityCommand),

    /// Book a slip
    Reserve(ReserveCommand),

    /// List your reservations
    Reservations(ReservationsCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Move a reservation to new dates
    Reschedule(RescheduleCommand),

    /// Mark finished stays as completed
    CompleteElapsed(CompleteElapsedCommand),

    /// Price a stay without booking
    Quote(QuoteCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "marina",
            "reservations",
            "--user",
            "3",
            "--today",
            "2026-01-15",
        ])
        .unwrap();
        assert_eq!(cli.user, Some(3));
        assert_eq!(cli.today.as_deref(), Some("2026-01-15"));
        assert!(matches!(cli.command, Command::Reservations(_)));
    }

    #[test]
    fn test_pinned_date_is_hidden_from_help() {
        let help = Cli::command().render_long_help().to_string();
        assert!(!help.contains("--today"));
        assert!(help.contains("--busy-timeout"));
    }
}
