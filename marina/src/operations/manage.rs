//! Account and reservation management around the booking core.
//!
//! Reservation writes (cancel, reschedule, completion) run in their own
//! `IMMEDIATE` transaction, like the allocator. A reservation or boat that
//! belongs to another user is reported as not found.

use std::collections::HashSet;
use std::time::SystemTime;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::boat::{validate_length, Boat, BoatId, BoatRegistry, NewBoat};
use crate::config::SlipSeed;
use crate::context::RequestContext;
use crate::database::{map_overlap, systemtime_to_unix_secs, Database};
use crate::error::{Error, Result};
use crate::pricing::CostBreakdown;
use crate::reservation::{ConfirmationCode, Reservation, ReservationStatus};
use crate::slip::{check_compatibility, validate_size_class, Slip, SlipId};
use crate::stay::StayRange;

use super::BookingRules;

/// Longest accepted slip location label.
const MAX_LOCATION_LEN: usize = 32;

fn owned_reservation(
    conn: &Connection,
    ctx: &RequestContext,
    code: &ConfirmationCode,
) -> Result<Reservation> {
    match Database::get_reservation_by_code(conn, code)? {
        Some(reservation) if reservation.user_id() == ctx.user_id => Ok(reservation),
        _ => Err(Error::not_found(format!("reservation {code}"))),
    }
}

fn reload(conn: &Connection, id: i64, code: &ConfirmationCode) -> Result<Reservation> {
    Database::get_reservation(conn, id)?
        .ok_or_else(|| Error::not_found(format!("reservation {code}")))
}

/// Looks up one of the caller's reservations.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown or foreign code.
pub fn find_reservation(
    conn: &Connection,
    ctx: &RequestContext,
    code: &ConfirmationCode,
) -> Result<Reservation> {
    owned_reservation(conn, ctx, code)
}

/// The caller's reservations, latest start first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_reservations(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Reservation>> {
    Database::list_reservations_for_user(conn, ctx.user_id)
}

/// Cancels a confirmed reservation. The slip is free for other bookings
/// as soon as this returns.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown or foreign code and
/// [`Error::InvalidStatusTransition`] unless the reservation is confirmed.
pub fn cancel_reservation(
    db: &mut Database,
    ctx: &RequestContext,
    code: &ConfirmationCode,
) -> Result<Reservation> {
    let tx = db.begin_immediate()?;
    let reservation = owned_reservation(&tx, ctx, code)?;

    if reservation.status() != ReservationStatus::Confirmed {
        return Err(Error::InvalidStatusTransition {
            code: code.to_string(),
            from: reservation.status().to_string(),
            to: ReservationStatus::Canceled.to_string(),
        });
    }

    let now = systemtime_to_unix_secs(SystemTime::now())?;
    Database::update_reservation_status(
        &tx,
        reservation.id(),
        ReservationStatus::Confirmed,
        ReservationStatus::Canceled,
        now,
    )?;
    let canceled = reload(&tx, reservation.id(), code)?;
    tx.commit()?;

    log::info!("canceled {code}, slip {} released", canceled.slip_id());
    Ok(canceled)
}

/// New dates for an existing reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleRequest {
    /// The reservation to move.
    pub code: ConfirmationCode,
    /// New arrival, `YYYY-MM-DD`.
    pub start: String,
    /// New departure, `YYYY-MM-DD`.
    pub end: String,
}

impl RescheduleRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(code: ConfirmationCode, start: &str, end: &str) -> Self {
        Self {
            code,
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Moves a confirmed reservation to new dates on the same slip and
/// re-prices it.
///
/// # Errors
///
/// - validation errors for bad dates
/// - [`Error::NotFound`] for an unknown or foreign code
/// - [`Error::InvalidStatusTransition`] unless the reservation is confirmed
/// - [`Error::SlipNoLongerAvailable`] if another booking holds the slip for
///   the new dates or the slip was taken out of service
/// - [`Error::BoatAlreadyBooked`] if the boat has another stay overlapping
///   the new dates
pub fn reschedule_reservation(
    db: &mut Database,
    ctx: &RequestContext,
    rules: &BookingRules,
    today: NaiveDate,
    request: &RescheduleRequest,
) -> Result<Reservation> {
    let stay = rules
        .stay
        .parse_and_validate(&request.start, &request.end, today)?;
    let code = &request.code;

    let tx = db.begin_immediate()?;
    let reservation = owned_reservation(&tx, ctx, code)?;
    if reservation.status() != ReservationStatus::Confirmed {
        return Err(Error::InvalidStatusTransition {
            code: code.to_string(),
            from: reservation.status().to_string(),
            to: "rescheduled".to_string(),
        });
    }

    let boat = tx
        .get_boat(reservation.boat_id())?
        .ok_or_else(|| Error::not_found(format!("boat {}", reservation.boat_id())))?;
    let slip = Database::get_slip(&tx, reservation.slip_id())?
        .ok_or_else(|| Error::not_found(format!("slip {}", reservation.slip_id())))?;
    check_compatibility(boat.length_feet, slip.size_feet)?;

    if !slip.in_service || Database::slip_has_overlap(&tx, slip.id, &stay, Some(reservation.id()))? {
        log::info!("cannot move {code} to {stay}: slip {} unavailable", slip.id);
        return Err(Error::SlipNoLongerAvailable {
            slip_id: slip.id.value(),
        });
    }

    if Database::boat_has_overlap(&tx, boat.id, &stay, Some(reservation.id()))? {
        log::info!("cannot move {code} to {stay}: boat {} booked elsewhere", boat.id);
        return Err(Error::BoatAlreadyBooked {
            boat_id: boat.id.value(),
        });
    }

    let cost = rules.pricing.cost_for_stay(boat.length_feet, stay.days())?;
    let now = systemtime_to_unix_secs(SystemTime::now())?;
    Database::update_reservation_stay(&tx, reservation.id(), &stay, cost.months, cost.total, now)
        .map_err(|e| map_overlap(e, slip.id, boat.id))?;
    let moved = reload(&tx, reservation.id(), code)?;
    tx.commit()?;

    log::info!(
        "rescheduled {code} from {} to {stay} ({})",
        reservation.stay(),
        moved.total()
    );
    Ok(moved)
}

/// Marks confirmed reservations that ended before `today` as completed and
/// returns how many were updated.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn complete_elapsed(db: &mut Database, today: NaiveDate) -> Result<usize> {
    let tx = db.begin_immediate()?;
    let now = systemtime_to_unix_secs(SystemTime::now())?;
    let completed = Database::complete_elapsed_reservations(&tx, today, now)?;
    tx.commit()?;

    if completed > 0 {
        log::info!("completed {completed} elapsed reservation(s) before {today}");
    }
    Ok(completed)
}

/// Registers a boat for the caller.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a blank name or out-of-range length.
pub fn register_boat(
    conn: &Connection,
    ctx: &RequestContext,
    rules: &BookingRules,
    name: &str,
    length_feet: u32,
) -> Result<Boat> {
    let boat = NewBoat::new(name, length_feet, rules.max_boat_length_feet)?;
    conn.create_boat(ctx.user_id, &boat)
}

/// The caller's boats.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_boats(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Boat>> {
    conn.list_boats(ctx.user_id)
}

/// Removes one of the caller's boats.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown or foreign boat and
/// [`Error::BoatInUse`] if any reservation references it.
pub fn remove_boat(conn: &Connection, ctx: &RequestContext, id: BoatId) -> Result<()> {
    conn.delete_boat(ctx.user_id, id)
}

fn validate_location(location: &str) -> Result<&str> {
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::invalid_input("location", "cannot be empty"));
    }
    if location.chars().count() > MAX_LOCATION_LEN {
        return Err(Error::invalid_input(
            "location",
            format!("cannot exceed {MAX_LOCATION_LEN} characters"),
        ));
    }
    Ok(location)
}

/// Adds an in-service slip.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a size that is not a configured
/// class, or a blank, overlong or duplicate location.
pub fn add_slip(
    conn: &Connection,
    rules: &BookingRules,
    size_feet: u32,
    location: &str,
) -> Result<Slip> {
    validate_size_class(size_feet, &rules.size_classes)?;
    let location = validate_location(location)?;
    let slip = Database::insert_slip(conn, size_feet, location)?;
    log::info!("added slip {slip}");
    Ok(slip)
}

/// Puts a slip in or out of service. Existing reservations are kept; an
/// out-of-service slip is only excluded from new bookings.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown slip.
pub fn set_slip_in_service(conn: &Connection, id: SlipId, in_service: bool) -> Result<Slip> {
    if !Database::set_slip_in_service(conn, id, in_service)? {
        return Err(Error::not_found(format!("slip {id}")));
    }
    log::info!(
        "slip {id} {}",
        if in_service { "returned to service" } else { "taken out of service" }
    );
    Database::get_slip(conn, id)?.ok_or_else(|| Error::not_found(format!("slip {id}")))
}

/// All slips, largest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_slips(conn: &Connection) -> Result<Vec<Slip>> {
    Database::list_slips(conn)
}

/// Adds the configured slips whose locations do not exist yet. Returns
/// the slips added. Either every missing seed is added or none is.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an invalid seed.
pub fn seed_slips(conn: &Connection, rules: &BookingRules, seeds: &[SlipSeed]) -> Result<Vec<Slip>> {
    let tx = conn.unchecked_transaction()?;
    let existing: HashSet<String> = Database::list_slips(&tx)?
        .into_iter()
        .map(|slip| slip.location)
        .collect();

    let mut added = Vec::new();
    for seed in seeds {
        if existing.contains(seed.location.trim()) {
            continue;
        }
        added.push(add_slip(&tx, rules, seed.size, &seed.location)?);
    }
    tx.commit()?;
    Ok(added)
}

/// The price of a stay, without choosing a slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// The validated stay.
    pub stay: StayRange,
    /// Boat length priced.
    pub length_feet: u32,
    /// Cost breakdown.
    pub cost: CostBreakdown,
}

/// Prices a stay for a boat of `length_feet` under the same date rules as
/// a booking.
///
/// # Errors
///
/// Returns a validation error for bad dates or an out-of-range length.
pub fn quote(
    rules: &BookingRules,
    today: NaiveDate,
    length_feet: u32,
    start: &str,
    end: &str,
) -> Result<Quote> {
    let stay = rules.stay.parse_and_validate(start, end, today)?;
    validate_length(length_feet, rules.max_boat_length_feet)?;
    let cost = rules.pricing.cost_for_stay(length_feet, stay.days())?;
    Ok(Quote {
        stay,
        length_feet,
        cost,
    })
}
