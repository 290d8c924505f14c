//! The reservation allocator.
//!
//! Claims one specific slip for a stay. The whole re-check-and-insert runs
//! in a single `IMMEDIATE` transaction, so two allocators racing for the
//! same slip are serialized: the second one sees the first one's row and
//! fails with [`Error::SlipNoLongerAvailable`]. The overlap triggers in the
//! schema back this up for any writer that bypasses the allocator. The same
//! transaction also keeps a boat from holding two stays at once.

use chrono::NaiveDate;

use crate::boat::{owned_boat, validate_length, BoatRegistry, BoatSelection};
use crate::confirmation::ConfirmationCodeSource;
use crate::context::RequestContext;
use crate::database::{Database, NewReservation};
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::slip::{check_compatibility, SlipId};

use super::BookingRules;

/// A request to book one slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// Arrival, `YYYY-MM-DD`.
    pub start: String,
    /// Departure, `YYYY-MM-DD`.
    pub end: String,
    /// The slip the caller picked from an availability report.
    pub slip_id: SlipId,
    /// Existing boat, or a new one to register with the booking.
    pub boat: BoatSelection,
}

impl ReservationRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(start: &str, end: &str, slip_id: SlipId, boat: BoatSelection) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            slip_id,
            boat,
        }
    }
}

/// Books `request.slip_id` for the caller.
///
/// Dates, boat ownership, boat length and slip size are validated again
/// even if the caller ran an availability check first. An inline boat is
/// registered in the same transaction and disappears with it if the
/// booking fails. Another slip is never substituted.
///
/// # Errors
///
/// - validation errors for bad dates or boat length
/// - [`Error::NotFound`] for an unknown slip or an unknown or foreign boat
/// - [`Error::SlipTooSmall`] if the boat does not fit
/// - [`Error::SlipNoLongerAvailable`] if the slip is out of service or
///   already held for overlapping dates
/// - [`Error::BoatAlreadyBooked`] if the boat already has a stay
///   overlapping these dates, on any slip
/// - [`Error::ConfirmationCodeExhausted`] if no unique code could be drawn
/// - [`Error::DataStoreUnavailable`] on storage failure or lock timeout
pub fn confirm_reservation(
    db: &mut Database,
    ctx: &RequestContext,
    rules: &BookingRules,
    today: NaiveDate,
    codes: &dyn ConfirmationCodeSource,
    request: &ReservationRequest,
) -> Result<Reservation> {
    let stay = rules
        .stay
        .parse_and_validate(&request.start, &request.end, today)?;
    if let BoatSelection::New(boat) = &request.boat {
        validate_length(boat.length_feet(), rules.max_boat_length_feet)?;
    }

    log::debug!(
        "user {} requests slip {} for {stay}",
        ctx.user_id,
        request.slip_id
    );

    let tx = db.begin_immediate()?;

    let boat_feet = match &request.boat {
        BoatSelection::Existing(id) => {
            let boat = owned_boat(&*tx, ctx.user_id, *id)?;
            validate_length(boat.length_feet, rules.max_boat_length_feet)?;
            boat.length_feet
        }
        BoatSelection::New(boat) => boat.length_feet(),
    };

    let slip = Database::get_slip(&tx, request.slip_id)?
        .ok_or_else(|| Error::not_found(format!("slip {}", request.slip_id)))?;
    check_compatibility(boat_feet, slip.size_feet)?;

    if !slip.in_service {
        log::info!("slip {} is out of service", slip.id);
        return Err(Error::SlipNoLongerAvailable {
            slip_id: slip.id.value(),
        });
    }
    if Database::slip_has_overlap(&tx, slip.id, &stay, None)? {
        log::info!("slip {} already held for {stay}", slip.id);
        return Err(Error::SlipNoLongerAvailable {
            slip_id: slip.id.value(),
        });
    }

    let boat_id = match &request.boat {
        BoatSelection::Existing(id) => {
            if Database::boat_has_overlap(&tx, *id, &stay, None)? {
                log::info!("boat {id} already booked during {stay}");
                return Err(Error::BoatAlreadyBooked { boat_id: id.value() });
            }
            *id
        }
        BoatSelection::New(new_boat) => tx.create_boat(ctx.user_id, new_boat)?.id,
    };

    let cost = rules.pricing.cost_for_stay(boat_feet, stay.days())?;
    let new = NewReservation {
        user_id: ctx.user_id,
        boat_id,
        slip_id: slip.id,
        stay,
        months: cost.months,
        total: cost.total,
    };
    let reservation = Database::insert_with_fresh_code(&tx, &new, codes, rules.max_code_attempts)?;

    tx.commit()?;

    log::info!(
        "confirmed {} on slip {} for {stay} ({})",
        reservation.code(),
        slip.location,
        reservation.total()
    );
    Ok(reservation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boat::NewBoat;
    use crate::confirmation::RandomCodeSource;
    use crate::database::test_util::{create_test_database, date, insert_test_boat};
    use crate::pricing::Money;
    use crate::reservation::ReservationStatus;

    fn today() -> NaiveDate {
        date("2026-01-15")
    }

    fn book(
        db: &mut Database,
        user: i64,
        slip_id: SlipId,
        boat: BoatSelection,
        start: &str,
        end: &str,
    ) -> Result<Reservation> {
        let request = ReservationRequest::new(start, end, slip_id, boat);
        confirm_reservation(
            db,
            &RequestContext::new(user.into()),
            &BookingRules::default(),
            today(),
            &RandomCodeSource::default(),
            &request,
        )
    }

    #[test]
    fn test_confirm_happy_path() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);

        let reservation = book(
            &mut db,
            1,
            slip.id,
            BoatSelection::Existing(boat),
            "2026-03-01",
            "2026-04-01",
        )
        .unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
        assert_eq!(reservation.total(), Money::from_cents(36_750));
        assert_eq!(reservation.months(), 1);
        assert_eq!(reservation.slip_id(), slip.id);
        assert!(reservation.code().as_str().starts_with("SLP-"));
    }

    #[test]
    fn test_overlapping_booking_rejected() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);

        book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap();
        let err = book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-03-15", "2026-04-15")
            .unwrap_err();
        assert!(matches!(err, Error::SlipNoLongerAvailable { .. }));
    }

    #[test]
    fn test_boat_cannot_hold_two_slips_at_once() {
        let mut db = create_test_database();
        let first = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let second = Database::insert_slip(db.connection(), 40, "B-2").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);

        book(&mut db, 1, first.id, BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap();
        let err = book(&mut db, 1, second.id, BoatSelection::Existing(boat), "2026-03-15", "2026-04-15")
            .unwrap_err();
        assert!(matches!(err, Error::BoatAlreadyBooked { boat_id } if boat_id == boat.value()));
        assert!(err.is_conflict());
        assert!(Database::list_holding_reservations(db.connection(), second.id)
            .unwrap()
            .is_empty());

        // the boat is free again the day after its stay ends
        book(&mut db, 1, second.id, BoatSelection::Existing(boat), "2026-04-02", "2026-05-02")
            .unwrap();
    }

    #[test]
    fn test_undersized_slip_rejected() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 45);

        let err = book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SlipTooSmall {
                slip_feet: 40,
                boat_feet: 45
            }
        ));
    }

    #[test]
    fn test_inline_boat_created_with_reservation() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();

        let boat = BoatSelection::New(NewBoat::new("Sea Biscuit", 34, 50).unwrap());
        let reservation = book(&mut db, 9, slip.id, boat, "2026-03-01", "2026-04-01").unwrap();

        let boats = db.connection().list_boats(9.into()).unwrap();
        assert_eq!(boats.len(), 1);
        assert_eq!(boats[0].id, reservation.boat_id());
    }

    #[test]
    fn test_failed_booking_leaves_no_inline_boat() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);
        book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap();

        let inline = BoatSelection::New(NewBoat::new("Latecomer", 30, 50).unwrap());
        let err = book(&mut db, 9, slip.id, inline, "2026-03-10", "2026-04-10").unwrap_err();
        assert!(err.is_conflict());
        assert!(db.connection().list_boats(9.into()).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_service_slip_rejected() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        Database::set_slip_in_service(db.connection(), slip.id, false).unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);

        let err = book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap_err();
        assert!(matches!(err, Error::SlipNoLongerAvailable { .. }));
    }

    #[test]
    fn test_unknown_slip_and_foreign_boat() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);

        let err = book(&mut db, 1, SlipId::from(99), BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        let err = book(&mut db, 2, slip.id, BoatSelection::Existing(boat), "2026-03-01", "2026-04-01")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_stay_rules_enforced() {
        let mut db = create_test_database();
        let slip = Database::insert_slip(db.connection(), 40, "B-1").unwrap();
        let boat = insert_test_boat(db.connection(), 1, 34);

        let err = book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-03-01", "2026-03-30")
            .unwrap_err();
        assert!(matches!(err, Error::StayTooShort { .. }));
        let err = book(&mut db, 1, slip.id, BoatSelection::Existing(boat), "2026-01-01", "2026-03-01")
            .unwrap_err();
        assert!(matches!(err, Error::PastStartDate { .. }));
    }
}
