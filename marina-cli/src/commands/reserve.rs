//! Reserve command implementation.
//!
//! Books a slip and prints the confirmation code on stdout.

use crate::error::CliError;
use crate::utils::{load_configuration, open_marina, reservation_json, BoatArgs, GlobalOptions};
use clap::Args;
use marina::SlipId;

/// Book a slip.
#[derive(Args)]
pub struct ReserveCommand {
    /// Slip to book
    #[arg(long, value_name = "ID")]
    pub slip: i64,

    /// First day of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Day the stay ends (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,

    #[command(flatten)]
    pub boat: BoatArgs,

    /// Print the reservation as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let mut marina = open_marina(global, load_configuration(global)?)?;
        let boat = self
            .boat
            .selection(marina.rules().max_boat_length_feet, None)?;

        let reservation = marina.confirm_reservation(
            &ctx,
            &self.start,
            &self.end,
            SlipId::from(self.slip),
            boat,
        )?;

        if self.json {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &reservation_json(&reservation))?;
            println!();
            return Ok(());
        }

        if !global.quiet {
            eprintln!(
                "Reserved slip {} for {}: {} month(s), total {}",
                reservation.slip_id(),
                reservation.stay(),
                reservation.months(),
                reservation.total()
            );
        }
        println!("{}", reservation.code());

        Ok(())
    }
}
