//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_marina, parse_code, GlobalOptions};
use clap::Args;

/// Cancel one of your confirmed reservations.
#[derive(Args)]
pub struct CancelCommand {
    /// Confirmation code
    pub code: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let code = parse_code(&self.code)?;
        let mut marina = open_marina(global, load_configuration(global)?)?;

        let reservation = marina.cancel_reservation(&ctx, &code)?;
        if !global.quiet {
            eprintln!(
                "Canceled {}; slip {} is free for {}",
                reservation.code(),
                reservation.slip_id(),
                reservation.stay()
            );
        }

        Ok(())
    }
}
