//! Reschedule command implementation.
//!
//! Moves a confirmed reservation to new dates on the same slip and prints
//! the new total.

use crate::error::CliError;
use crate::utils::{load_configuration, open_marina, parse_code, GlobalOptions};
use clap::Args;

/// Move one of your reservations to new dates.
#[derive(Args)]
pub struct RescheduleCommand {
    /// Confirmation code
    pub code: String,

    /// New first day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// New end day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,
}

impl RescheduleCommand {
    /// Execute the reschedule command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let code = parse_code(&self.code)?;
        let mut marina = open_marina(global, load_configuration(global)?)?;

        let reservation = marina.reschedule_reservation(&ctx, &code, &self.start, &self.end)?;
        if !global.quiet {
            eprintln!(
                "Moved {} to {}: {} month(s)",
                reservation.code(),
                reservation.stay(),
                reservation.months()
            );
        }
        println!("{}", reservation.total());

        Ok(())
    }
}
