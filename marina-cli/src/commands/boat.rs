//! Boat management commands.

use crate::error::CliError;
use crate::utils::{load_configuration, open_marina, resolve_format, Format, GlobalOptions};
use clap::{Args, Subcommand};
use marina::BoatId;

/// Manage your boats.
#[derive(Args)]
pub struct BoatCommand {
    #[command(subcommand)]
    pub action: BoatAction,
}

/// Boat subcommands.
#[derive(Subcommand)]
pub enum BoatAction {
    /// Register a boat
    Add {
        /// Boat name
        #[arg(long)]
        name: String,

        /// Length overall in feet
        #[arg(long, value_name = "FEET")]
        length: u32,
    },

    /// List your boats
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<Format>,
    },

    /// Remove a boat with no reservation history
    Remove {
        /// Boat id
        id: i64,
    },
}

impl BoatCommand {
    /// Execute the boat command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let ctx = global.context()?;
        let marina = open_marina(global, load_configuration(global)?)?;

        match self.action {
            BoatAction::Add { name, length } => {
                let boat = marina.register_boat(&ctx, &name, length)?;
                if !global.quiet {
                    eprintln!("Registered {} ({} ft)", boat.name, boat.length_feet);
                }
                println!("{}", boat.id);
            }
            BoatAction::List { format } => {
                let boats = marina.list_boats(&ctx)?;
                match resolve_format(format, marina.config()) {
                    Format::Json => {
                        serde_json::to_writer_pretty(std::io::stdout().lock(), &boats)?;
                        println!();
                    }
                    Format::Csv => {
                        let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
                        writer.write_record(["id", "name", "length_feet"])?;
                        for boat in &boats {
                            writer.write_record([
                                boat.id.to_string(),
                                boat.name.clone(),
                                boat.length_feet.to_string(),
                            ])?;
                        }
                        writer.flush()?;
                    }
                    Format::Human => {
                        println!("ID\tLENGTH\tNAME");
                        for boat in &boats {
                            println!("{}\t{}\t{}", boat.id, boat.length_feet, boat.name);
                        }
                    }
                }
            }
            BoatAction::Remove { id } => {
                marina.remove_boat(&ctx, BoatId::from(id))?;
                if !global.quiet {
                    eprintln!("Removed boat {id}");
                }
            }
        }

        Ok(())
    }
}
