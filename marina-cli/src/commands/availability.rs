//! Availability command implementation.
//!
//! Lists the slips that can take a boat for a stay, largest first, with the
//! estimated cost.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_marina, slip_row, BoatArgs, GlobalOptions, SLIP_HEADER,
};
use clap::Args;

/// Placeholder name for an availability check on an unregistered boat.
const UNREGISTERED_BOAT: &str = "unregistered boat";

/// List slips free for a stay.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// First day of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Day the stay ends (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,

    /// Requested slip size class in feet
    #[arg(long, value_name = "FEET")]
    pub size_class: u32,

    #[command(flatten)]
    pub boat: BoatArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let marina = open_marina(global, load_configuration(global)?)?;
        let boat = self
            .boat
            .selection(marina.rules().max_boat_length_feet, Some(UNREGISTERED_BOAT))?;

        let report =
            marina.check_availability(&ctx, &self.start, &self.end, self.size_class, &boat)?;

        if self.json {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &report)?;
            println!();
            return Ok(());
        }

        if !global.quiet {
            eprintln!(
                "Stay {} ({} day(s), {} month(s)), slips of {} ft or more, estimate {}",
                report.stay,
                report.stay.days(),
                report.months,
                report.required_minimum_feet,
                report.estimate.total
            );
        }

        if report.candidate_slips.is_empty() {
            if !global.quiet {
                eprintln!("No slips available");
            }
            return Ok(());
        }

        println!("{SLIP_HEADER}");
        for slip in &report.candidate_slips {
            println!("{}", slip_row(slip));
        }

        Ok(())
    }
}
