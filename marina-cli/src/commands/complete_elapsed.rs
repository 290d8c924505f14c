//! Complete-elapsed command implementation.
//!
//! Marks confirmed reservations whose stay ended before today as completed.

use crate::error::CliError;
use crate::utils::{load_configuration, open_marina, GlobalOptions};
use clap::Args;

/// Mark finished stays as completed.
#[derive(Args)]
pub struct CompleteElapsedCommand {}

impl CompleteElapsedCommand {
    /// Execute the complete-elapsed command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut marina = open_marina(global, load_configuration(global)?)?;

        let completed = marina.complete_elapsed()?;
        if !global.quiet {
            eprintln!("Completed {completed} reservation(s) ending before {}", marina.today());
        }
        println!("{completed}");

        Ok(())
    }
}
