//! Slip administration commands.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_marina, resolve_format, slip_row, Format, GlobalOptions,
    SLIP_HEADER,
};
use clap::{Args, Subcommand};
use marina::SlipId;

/// Manage slips.
#[derive(Args)]
pub struct SlipCommand {
    #[command(subcommand)]
    pub action: SlipAction,
}

/// Slip subcommands.
#[derive(Subcommand)]
pub enum SlipAction {
    /// Add a slip
    Add {
        /// Size class in feet
        #[arg(long, value_name = "FEET")]
        size: u32,

        /// Dock position label, e.g. B-12
        #[arg(long)]
        location: String,
    },

    /// List all slips
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<Format>,
    },

    /// Take a slip out of service
    Disable {
        /// Slip id
        id: i64,
    },

    /// Return a slip to service
    Enable {
        /// Slip id
        id: i64,
    },
}

impl SlipCommand {
    /// Execute the slip command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let marina = open_marina(global, load_configuration(global)?)?;

        match self.action {
            SlipAction::Add { size, location } => {
                let slip = marina.add_slip(size, &location)?;
                if !global.quiet {
                    eprintln!("Added {slip}");
                }
                println!("{}", slip.id);
            }
            SlipAction::List { format } => {
                let slips = marina.list_slips()?;
                match resolve_format(format, marina.config()) {
                    Format::Json => {
                        serde_json::to_writer_pretty(std::io::stdout().lock(), &slips)?;
                        println!();
                    }
                    Format::Csv => {
                        let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
                        writer.write_record(["id", "size_feet", "location", "in_service"])?;
                        for slip in &slips {
                            writer.write_record([
                                slip.id.to_string(),
                                slip.size_feet.to_string(),
                                slip.location.clone(),
                                slip.in_service.to_string(),
                            ])?;
                        }
                        writer.flush()?;
                    }
                    Format::Human => {
                        println!("{SLIP_HEADER}");
                        for slip in &slips {
                            println!("{}", slip_row(slip));
                        }
                    }
                }
            }
            SlipAction::Disable { id } => {
                let slip = marina.set_slip_in_service(SlipId::from(id), false)?;
                println!("{slip}");
            }
            SlipAction::Enable { id } => {
                let slip = marina.set_slip_in_service(SlipId::from(id), true)?;
                println!("{slip}");
            }
        }

        Ok(())
    }
}
