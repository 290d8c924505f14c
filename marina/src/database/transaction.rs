//! Write transactions and the confirmation-code insert loop.

use std::time::SystemTime;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::boat::BoatId;
use crate::confirmation::ConfirmationCodeSource;
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::slip::SlipId;

use super::connection::Database;
use super::queries::{
    is_boat_overlap_abort, is_overlap_abort, is_unique_violation, systemtime_to_unix_secs,
    NewReservation,
};

const CODE_COLUMN: &str = "reservations.confirmation_code";

/// Translates an overlap-trigger abort into [`Error::SlipNoLongerAvailable`]
/// or [`Error::BoatAlreadyBooked`]; other errors pass through as storage
/// failures.
pub(crate) fn map_overlap(err: rusqlite::Error, slip_id: SlipId, boat_id: BoatId) -> Error {
    if is_overlap_abort(&err) {
        Error::SlipNoLongerAvailable {
            slip_id: slip_id.value(),
        }
    } else if is_boat_overlap_abort(&err) {
        Error::BoatAlreadyBooked {
            boat_id: boat_id.value(),
        }
    } else {
        err.into()
    }
}

impl Database {
    /// Begins an `IMMEDIATE` transaction.
    ///
    /// The database write lock is taken when the transaction starts, so
    /// concurrent writers queue here (bounded by the busy timeout) rather
    /// than failing at commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataStoreUnavailable`] if the lock cannot be taken
    /// within the busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Inserts a confirmed reservation under a freshly generated code.
    ///
    /// A code that collides with an existing one is discarded and a new one
    /// drawn, up to `max_attempts` codes in total. A failed statement only
    /// rolls back itself, so the surrounding transaction stays usable
    /// between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SlipNoLongerAvailable`] or [`Error::BoatAlreadyBooked`]
    /// if an overlap guard fires,
    /// [`Error::ConfirmationCodeExhausted`] if every code collided, or a
    /// storage error.
    pub fn insert_with_fresh_code(
        conn: &Connection,
        new: &NewReservation,
        codes: &dyn ConfirmationCodeSource,
        max_attempts: u32,
    ) -> Result<Reservation> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;

        for attempt in 1..=max_attempts {
            let code = codes.next_code();
            match Self::insert_reservation(conn, new, &code, now) {
                Ok(id) => {
                    return Self::get_reservation(conn, id)?
                        .ok_or_else(|| Error::not_found(format!("reservation {code}")));
                }
                Err(e) if is_unique_violation(&e, CODE_COLUMN) => {
                    log::warn!("confirmation code collision on attempt {attempt}, regenerating");
                }
                Err(e) => return Err(map_overlap(e, new.slip_id, new.boat_id)),
            }
        }

        Err(Error::ConfirmationCodeExhausted {
            attempts: max_attempts,
        })
    }
}
