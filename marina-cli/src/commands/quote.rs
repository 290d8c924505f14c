//! Quote command implementation.
//!
//! Prices a stay from configuration alone; no database is opened.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use marina::operations::quote;
use marina::{BookingRules, Clock, LocalClock};

/// Price a stay without booking.
#[derive(Args)]
pub struct QuoteCommand {
    /// Boat length in feet
    #[arg(long, value_name = "FEET")]
    pub length: u32,

    /// First day of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Day the stay ends (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}

impl QuoteCommand {
    /// Execute the quote command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let rules = BookingRules::from_config(&config);
        let today = global.pinned_today()?.unwrap_or_else(|| LocalClock.today());

        let priced = quote(&rules, today, self.length, &self.start, &self.end)?;

        if self.json {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &priced)?;
            println!();
            return Ok(());
        }

        if !global.quiet {
            eprintln!(
                "{} ft for {}: base {} + hookup {} ({} month(s))",
                priced.length_feet,
                priced.stay,
                priced.cost.base,
                priced.cost.hookup,
                priced.cost.months
            );
        }
        println!("{}", priced.cost.total);

        Ok(())
    }
}
