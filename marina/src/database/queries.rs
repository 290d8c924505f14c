//! Row-level reads and writes for slips and reservations.
//!
//! Every function takes a plain `&Connection` so it can run standalone or
//! inside a transaction opened by the caller. None of them open a
//! transaction themselves.

use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::boat::BoatId;
use crate::context::UserId;
use crate::error::{Error, Result};
use crate::pricing::Money;
use crate::reservation::{ConfirmationCode, Reservation, ReservationStatus};
use crate::slip::{Slip, SlipId};
use crate::stay::StayRange;

use super::connection::Database;
use super::schema::RESERVATION_COLUMNS;

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

/// Expects columns: id, `size_feet`, location, `in_service`.
fn row_to_slip(row: &rusqlite::Row<'_>) -> rusqlite::Result<Slip> {
    Ok(Slip {
        id: SlipId::from(row.get::<_, i64>(0)?),
        size_feet: row.get(1)?,
        location: row.get(2)?,
        in_service: row.get(3)?,
    })
}

/// Expects columns in [`RESERVATION_COLUMNS`] order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let code: String = row.get(1)?;
    let user_id: i64 = row.get(2)?;
    let boat_id: i64 = row.get(3)?;
    let slip_id: i64 = row.get(4)?;
    let start: NaiveDate = row.get(5)?;
    let end: NaiveDate = row.get(6)?;
    let months: u32 = row.get(7)?;
    let total_cents: i64 = row.get(8)?;
    let status: String = row.get(9)?;
    let created_secs: i64 = row.get(10)?;
    let updated_secs: i64 = row.get(11)?;

    let code = ConfirmationCode::new(&code).map_err(|e| conversion_error(1, e))?;
    let stay = StayRange::new(start, end).map_err(|e| conversion_error(5, e))?;
    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| conversion_error(9, e))?;

    Reservation::builder(code, SlipId::from(slip_id), stay)
        .id(id)
        .user(UserId::from(user_id))
        .boat(BoatId::from(boat_id))
        .cost(months, Money::from_cents(total_cents))
        .status(status)
        .created_at(unix_secs_to_systemtime(created_secs))
        .updated_at(unix_secs_to_systemtime(updated_secs))
        .build()
        .map_err(|e| conversion_error(0, e))
}

/// A reservation about to be inserted; the confirmation code is supplied
/// separately so that it can be regenerated on collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// Owning user.
    pub user_id: UserId,
    /// Booked boat.
    pub boat_id: BoatId,
    /// Claimed slip.
    pub slip_id: SlipId,
    /// Dates of the stay.
    pub stay: StayRange,
    /// Billed months.
    pub months: u32,
    /// Total cost.
    pub total: Money,
}

const INSERT_SLIP: &str = "INSERT INTO slips (size_feet, location, in_service) VALUES (?, ?, 1)";

const SELECT_SLIP: &str = "SELECT id, size_feet, location, in_service FROM slips WHERE id = ?";

const LIST_SLIPS: &str = r"
    SELECT id, size_feet, location, in_service
    FROM slips
    ORDER BY size_feet DESC, id ASC
";

const UPDATE_SLIP_SERVICE: &str = "UPDATE slips SET in_service = ? WHERE id = ?";

const SELECT_AVAILABLE_SLIPS: &str = r"
    SELECT s.id, s.size_feet, s.location, s.in_service
    FROM slips s
    WHERE s.size_feet >= ?1
      AND s.in_service = 1
      AND NOT EXISTS (
          SELECT 1 FROM reservations r
          WHERE r.slip_id = s.id
            AND r.status <> 'canceled'
            AND NOT (r.end_date < ?2 OR r.start_date > ?3)
      )
    ORDER BY s.size_feet DESC, s.id ASC
";

const CHECK_SLIP_OVERLAP: &str = r"
    SELECT EXISTS (
        SELECT 1 FROM reservations r
        WHERE r.slip_id = ?1
          AND r.status <> 'canceled'
          AND NOT (r.end_date < ?2 OR r.start_date > ?3)
          AND (?4 IS NULL OR r.id <> ?4)
    )
";

const CHECK_BOAT_OVERLAP: &str = r"
    SELECT EXISTS (
        SELECT 1 FROM reservations r
        WHERE r.boat_id = ?1
          AND r.status <> 'canceled'
          AND NOT (r.end_date < ?2 OR r.start_date > ?3)
          AND (?4 IS NULL OR r.id <> ?4)
    )
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (confirmation_code, user_id, boat_id, slip_id, start_date, end_date,
     months, total_cents, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'confirmed', ?, ?)
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?, updated_at = ?
    WHERE id = ? AND status = ?
";

const UPDATE_STAY: &str = r"
    UPDATE reservations
    SET start_date = ?, end_date = ?, months = ?, total_cents = ?, updated_at = ?
    WHERE id = ?
";

const COMPLETE_ELAPSED: &str = r"
    UPDATE reservations
    SET status = 'completed', updated_at = ?
    WHERE status = 'confirmed' AND end_date < ?
";

const COUNT_BOAT_RESERVATIONS: &str = "SELECT COUNT(*) FROM reservations WHERE boat_id = ?";

impl Database {
    /// Adds a slip. Locations are unique.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a duplicate location and
    /// [`Error::DataStoreUnavailable`] for other storage failures.
    pub fn insert_slip(conn: &Connection, size_feet: u32, location: &str) -> Result<Slip> {
        let location = location.trim();
        match conn.execute(INSERT_SLIP, params![size_feet, location]) {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e, "slips.location") => {
                return Err(Error::invalid_input(
                    "location",
                    format!("slip location {location} already exists"),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Slip {
            id: SlipId::from(conn.last_insert_rowid()),
            size_feet,
            location: location.to_string(),
            in_service: true,
        })
    }

    /// Looks up a slip.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_slip(conn: &Connection, id: SlipId) -> Result<Option<Slip>> {
        Ok(conn
            .query_row(SELECT_SLIP, [id.value()], row_to_slip)
            .optional()?)
    }

    /// Lists every slip, largest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slips(conn: &Connection) -> Result<Vec<Slip>> {
        let mut stmt = conn.prepare(LIST_SLIPS)?;
        let slips = stmt
            .query_map([], row_to_slip)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slips)
    }

    /// Marks a slip in or out of service. Returns `false` for an unknown
    /// slip.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_slip_in_service(conn: &Connection, id: SlipId, in_service: bool) -> Result<bool> {
        let rows = conn.execute(UPDATE_SLIP_SERVICE, params![in_service, id.value()])?;
        Ok(rows > 0)
    }

    /// In-service slips of at least `min_size_feet` with no holding
    /// reservation overlapping `stay`, largest first then by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_available_slips(
        conn: &Connection,
        min_size_feet: u32,
        stay: &StayRange,
    ) -> Result<Vec<Slip>> {
        let mut stmt = conn.prepare_cached(SELECT_AVAILABLE_SLIPS)?;
        let slips = stmt
            .query_map(params![min_size_feet, stay.start(), stay.end()], row_to_slip)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slips)
    }

    /// Whether a holding reservation on `slip_id` overlaps `stay`, ignoring
    /// the reservation with id `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn slip_has_overlap(
        conn: &Connection,
        slip_id: SlipId,
        stay: &StayRange,
        exclude: Option<i64>,
    ) -> Result<bool> {
        Ok(conn.query_row(
            CHECK_SLIP_OVERLAP,
            params![slip_id.value(), stay.start(), stay.end(), exclude],
            |row| row.get(0),
        )?)
    }

    /// Whether `boat_id` already has a non-canceled reservation overlapping
    /// `stay`, ignoring the reservation with id `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn boat_has_overlap(
        conn: &Connection,
        boat_id: BoatId,
        stay: &StayRange,
        exclude: Option<i64>,
    ) -> Result<bool> {
        Ok(conn.query_row(
            CHECK_BOAT_OVERLAP,
            params![boat_id.value(), stay.start(), stay.end(), exclude],
            |row| row.get(0),
        )?)
    }

    /// Inserts a confirmed reservation and returns its row id.
    ///
    /// The raw `rusqlite` error is returned so that callers can tell a code
    /// collision from an overlap abort.
    ///
    /// # Errors
    ///
    /// Returns the `SQLite` error on any constraint or trigger failure.
    pub fn insert_reservation(
        conn: &Connection,
        new: &NewReservation,
        code: &ConfirmationCode,
        now_secs: i64,
    ) -> rusqlite::Result<i64> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                code.as_str(),
                new.user_id.value(),
                new.boat_id.value(),
                new.slip_id.value(),
                new.stay.start(),
                new.stay.end(),
                new.months,
                new.total.cents(),
                now_secs,
                now_secs,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Looks up a reservation by row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_reservation).optional()?)
    }

    /// Looks up a reservation by confirmation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation_by_code(
        conn: &Connection,
        code: &ConfirmationCode,
    ) -> Result<Option<Reservation>> {
        let sql =
            format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE confirmation_code = ?");
        Ok(conn
            .query_row(&sql, [code.as_str()], row_to_reservation)
            .optional()?)
    }

    /// A user's reservations, latest start first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_user(conn: &Connection, user: UserId) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = ? \
             ORDER BY start_date DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([user.value()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Reservations that hold `slip_id`, by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_holding_reservations(conn: &Connection, slip_id: SlipId) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE slip_id = ? AND status <> 'canceled' ORDER BY start_date, id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([slip_id.value()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Moves a reservation from `from` to `to`. Returns `false` if the row
    /// was not in state `from`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_reservation_status(
        conn: &Connection,
        id: i64,
        from: ReservationStatus,
        to: ReservationStatus,
        now_secs: i64,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_STATUS,
            params![to.as_str(), now_secs, id, from.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Rewrites a reservation's dates and cost.
    ///
    /// # Errors
    ///
    /// Returns the raw `SQLite` error, including the overlap trigger abort.
    pub fn update_reservation_stay(
        conn: &Connection,
        id: i64,
        stay: &StayRange,
        months: u32,
        total: Money,
        now_secs: i64,
    ) -> rusqlite::Result<usize> {
        conn.execute(
            UPDATE_STAY,
            params![stay.start(), stay.end(), months, total.cents(), now_secs, id],
        )
    }

    /// Marks confirmed reservations that ended before `today` as completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn complete_elapsed_reservations(
        conn: &Connection,
        today: NaiveDate,
        now_secs: i64,
    ) -> Result<usize> {
        Ok(conn.execute(COMPLETE_ELAPSED, params![now_secs, today])?)
    }

    /// Number of reservations, of any status, that reference a boat.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_reservations_for_boat(conn: &Connection, boat_id: BoatId) -> Result<i64> {
        Ok(conn.query_row(COUNT_BOAT_RESERVATIONS, [boat_id.value()], |row| row.get(0))?)
    }
}

/// Whether `err` is a UNIQUE violation on `column` (`table.column`).
pub(super) fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(message)) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE && message.contains(column)
        }
        _ => false,
    }
}

/// Whether `err` is the slip overlap trigger's abort.
pub(super) fn is_overlap_abort(err: &rusqlite::Error) -> bool {
    is_trigger_abort(err, super::schema::OVERLAP_MARKER)
}

/// Whether `err` is the boat overlap trigger's abort.
pub(super) fn is_boat_overlap_abort(err: &rusqlite::Error) -> bool {
    is_trigger_abort(err, super::schema::BOAT_OVERLAP_MARKER)
}

fn is_trigger_abort(err: &rusqlite::Error, marker: &str) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.contains(marker)
    )
}
