//! Shared test utilities for database unit tests.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::tempdir;

use crate::boat::{BoatId, BoatRegistry, NewBoat};
use crate::context::UserId;
use crate::database::{Database, DatabaseConfig, NewReservation};
use crate::pricing::Money;
use crate::reservation::ConfirmationCode;
use crate::slip::SlipId;
use crate::stay::StayRange;

static NEXT_CODE: AtomicU32 = AtomicU32::new(1);

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Parses a `YYYY-MM-DD` literal.
///
/// # Panics
///
/// Panics on a malformed date.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Registers a boat of `length_feet` for user `owner`.
///
/// # Panics
///
/// Panics if the boat cannot be created.
pub fn insert_test_boat(conn: &Connection, owner: i64, length_feet: u32) -> BoatId {
    let boat = NewBoat::new("Test Boat", length_feet, 100).unwrap();
    conn.create_boat(UserId::from(owner), &boat).unwrap().id
}

/// Inserts a confirmed reservation owned by the boat's owner with a unique
/// code. Returns the row id.
///
/// # Panics
///
/// Panics if the insert fails, including on overlap.
pub fn insert_test_reservation(
    conn: &Connection,
    slip_id: SlipId,
    boat_id: BoatId,
    start: &str,
    end: &str,
) -> i64 {
    let owner = conn.get_boat(boat_id).unwrap().unwrap().owner_id;
    let new = NewReservation {
        user_id: owner,
        boat_id,
        slip_id,
        stay: StayRange::parse(start, end).unwrap(),
        months: 1,
        total: Money::from_cents(10_000),
    };
    let n = NEXT_CODE.fetch_add(1, Ordering::Relaxed);
    let code = ConfirmationCode::new(&format!("TEST-{n:06}")).unwrap();
    Database::insert_reservation(conn, &new, &code, 0).unwrap()
}
