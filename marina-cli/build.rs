//! Build script for marina-cli.
//!
//! Generates the man page into OUT_DIR with clap_mangen. Build scripts cannot
//! depend on the crate being built, so the command tree is restated here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("marina")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book marina slips for boats")
        .long_about(
            "Check slip availability, book slips for boats and manage reservations",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("MARINA_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("MARINA_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("MARINA_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("User id to act as")
                .value_name("ID")
                .global(true)
                .env("MARINA_USER"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .help("Pin the current date (YYYY-MM-DD)")
                .value_name("DATE")
                .global(true)
                .env("MARINA_TODAY"),
        )
        .subcommands(vec![
            Command::new("init").about("Initialize the data directory and database"),
            Command::new("slip").about("Manage slips (add, list, disable, enable)"),
            Command::new("boat").about("Manage your boats (add, list, remove)"),
            Command::new("availability").about("List slips free for a stay"),
            Command::new("reserve").about("Book a slip"),
            Command::new("reservations").about("List your reservations"),
            Command::new("show").about("Show one reservation"),
            Command::new("cancel").about("Cancel a reservation"),
            Command::new("reschedule").about("Move a reservation to new dates"),
            Command::new("complete-elapsed").about("Mark finished stays as completed"),
            Command::new("quote").about("Price a stay without booking"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("marina.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
