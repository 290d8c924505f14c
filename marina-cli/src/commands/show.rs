//! Show command implementation.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_marina, parse_code, reservation_json,
    GlobalOptions,
};
use clap::Args;

/// Show one of your reservations.
#[derive(Args)]
pub struct ShowCommand {
    /// Confirmation code
    pub code: String,

    /// Print the reservation as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let code = parse_code(&self.code)?;
        let marina = open_marina(global, load_configuration(global)?)?;

        let reservation = marina.find_reservation(&ctx, &code)?;

        if self.json {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &reservation_json(&reservation))?;
            println!();
            return Ok(());
        }

        println!("Code:     {}", reservation.code());
        println!("Status:   {}", reservation.status());
        println!("Slip:     {}", reservation.slip_id());
        println!("Boat:     {}", reservation.boat_id());
        println!(
            "Stay:     {} ({} day(s))",
            reservation.stay(),
            reservation.stay().days()
        );
        println!("Months:   {}", reservation.months());
        println!("Total:    {}", reservation.total());
        println!("Created:  {}", format_timestamp(reservation.created_at()));
        println!("Updated:  {}", format_timestamp(reservation.updated_at()));

        Ok(())
    }
}
