//! Main entry point for the marina CLI.
//!
//! Commands for booking marina slips:
//! - `availability`: List slips free for a stay
//! - `reserve`: Book a slip
//! - `reservations` / `show`: Look up bookings
//! - `cancel` / `reschedule`: Change a booking
//! - `slip` / `boat`: Manage reference data and boats

use clap::Parser;
use marina_cli::cli::{Cli, Command};
use marina_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = marina::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        user: cli.user,
        today: cli.today,
    };

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::Slip(cmd) => cmd.execute(&global),
        Command::Boat(cmd) => cmd.execute(&global),
        Command::Availability(cmd) => cmd.execute(&global),
        Command::Reserve(cmd) => cmd.execute(&global),
        Command::Reservations(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Reschedule(cmd) => cmd.execute(&global),
        Command::CompleteElapsed(cmd) => cmd.execute(&global),
        Command::Quote(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
