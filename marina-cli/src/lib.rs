//! Library exports for marina-cli.
//!
//! Exposes the CLI structure to the binary and to tooling such as
//! completion and man page generation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
