//! Persistent storage for slips, boats and reservations.
//!
//! A fixed, versioned `SQLite` schema. Reads are plain associated functions
//! on [`Database`] taking a `&Connection`, so the allocator can run them
//! inside its own `IMMEDIATE` transaction. Overlap between slip-holding
//! reservations is additionally rejected by triggers.
//!
//! # Examples
//!
//! ```no_run
//! use marina::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/marina.db")).unwrap();
//! for slip in Database::list_slips(db.connection()).unwrap() {
//!     println!("{slip}");
//! }
//! ```

mod boats;
mod config;
mod connection;
pub mod migrations;
mod queries;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use queries::NewReservation;

pub(crate) use queries::systemtime_to_unix_secs;
pub(crate) use transaction::map_overlap;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
