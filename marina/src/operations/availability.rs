//! Availability queries.
//!
//! Lists the slips that could take a boat for a stay. Nothing is locked or
//! reserved here; the allocator re-checks everything when a slip is chosen.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::boat::{owned_boat, validate_length, BoatSelection};
use crate::context::RequestContext;
use crate::database::Database;
use crate::error::Result;
use crate::pricing::CostBreakdown;
use crate::slip::{required_minimum_size, validate_size_class, Slip};
use crate::stay::StayRange;

use super::BookingRules;

/// What the caller is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    /// Requested arrival, `YYYY-MM-DD`.
    pub start: String,
    /// Requested departure, `YYYY-MM-DD`.
    pub end: String,
    /// Requested slip size class, in feet.
    pub size_class: u32,
    /// The boat to be berthed.
    pub boat: BoatSelection,
}

impl AvailabilityRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(start: &str, end: &str, size_class: u32, boat: BoatSelection) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            size_class,
            boat,
        }
    }
}

/// Candidate slips plus a cost estimate for the stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    /// The validated stay.
    pub stay: StayRange,
    /// `max(size class, boat length)`.
    pub required_minimum_feet: u32,
    /// Billed months for the stay.
    pub months: u32,
    /// Cost the stay would have; independent of which slip is picked.
    pub estimate: CostBreakdown,
    /// Free in-service slips, largest first then by id.
    pub candidate_slips: Vec<Slip>,
}

/// Lists slips that can take the boat for the requested stay.
///
/// Validates the dates, the size class and the boat (an existing boat must
/// belong to the caller) before querying.
///
/// # Errors
///
/// Returns a validation error for bad dates, size class or boat length,
/// [`Error::NotFound`](crate::Error::NotFound) for an unknown or foreign
/// boat, and [`Error::DataStoreUnavailable`](crate::Error::DataStoreUnavailable)
/// if the store cannot be read.
pub fn check_availability(
    conn: &Connection,
    ctx: &RequestContext,
    rules: &BookingRules,
    today: NaiveDate,
    request: &AvailabilityRequest,
) -> Result<AvailabilityReport> {
    let stay = rules
        .stay
        .parse_and_validate(&request.start, &request.end, today)?;
    validate_size_class(request.size_class, &rules.size_classes)?;

    let boat_feet = match &request.boat {
        BoatSelection::Existing(id) => owned_boat(conn, ctx.user_id, *id)?.length_feet,
        BoatSelection::New(boat) => boat.length_feet(),
    };
    validate_length(boat_feet, rules.max_boat_length_feet)?;

    let required_minimum_feet = required_minimum_size(request.size_class, boat_feet);
    let estimate = rules.pricing.cost_for_stay(boat_feet, stay.days())?;
    let candidate_slips = Database::find_available_slips(conn, required_minimum_feet, &stay)?;

    log::debug!(
        "availability {stay} for {boat_feet} ft (min {required_minimum_feet} ft): {} slip(s)",
        candidate_slips.len()
    );

    Ok(AvailabilityReport {
        stay,
        required_minimum_feet,
        months: estimate.months,
        estimate,
        candidate_slips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boat::{BoatId, NewBoat};
    use crate::database::test_util::{create_test_database, date, insert_test_boat, insert_test_reservation};
    use crate::error::Error;
    use crate::pricing::Money;

    fn today() -> NaiveDate {
        date("2026-01-15")
    }

    fn seed(conn: &Connection) {
        for (size, location) in [(26, "A-1"), (40, "B-1"), (40, "B-2"), (50, "C-1")] {
            Database::insert_slip(conn, size, location).unwrap();
        }
    }

    #[test]
    fn test_happy_path_lists_matching_slips() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn);
        let boat = insert_test_boat(conn, 1, 34);
        let ctx = RequestContext::new(1.into());

        let request = AvailabilityRequest::new(
            "2026-03-01",
            "2026-04-01",
            40,
            BoatSelection::Existing(boat),
        );
        let report = check_availability(conn, &ctx, &BookingRules::default(), today(), &request)
            .unwrap();

        let sizes: Vec<_> = report.candidate_slips.iter().map(|s| s.size_feet).collect();
        assert_eq!(sizes, vec![50, 40, 40]);
        assert_eq!(report.required_minimum_feet, 40);
        assert_eq!(report.months, 1);
        assert_eq!(report.estimate.total, Money::from_cents(36_750));
    }

    #[test]
    fn test_long_boat_raises_minimum() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn);
        let ctx = RequestContext::new(1.into());

        let boat = BoatSelection::New(NewBoat::new("Long", 45, 50).unwrap());
        let request = AvailabilityRequest::new("2026-03-01", "2026-04-01", 26, boat);
        let report = check_availability(conn, &ctx, &BookingRules::default(), today(), &request)
            .unwrap();

        assert_eq!(report.required_minimum_feet, 45);
        assert!(report.candidate_slips.iter().all(|s| s.size_feet >= 45));
        assert_eq!(report.candidate_slips.len(), 1);
    }

    #[test]
    fn test_booked_slip_excluded() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn);
        let boat = insert_test_boat(conn, 1, 34);
        let taken = Database::list_slips(conn).unwrap()[0].id;
        insert_test_reservation(conn, taken, boat, "2026-03-01", "2026-04-01");
        let ctx = RequestContext::new(1.into());

        let request = AvailabilityRequest::new(
            "2026-03-15",
            "2026-04-15",
            40,
            BoatSelection::Existing(boat),
        );
        let report = check_availability(conn, &ctx, &BookingRules::default(), today(), &request)
            .unwrap();
        assert!(report.candidate_slips.iter().all(|s| s.id != taken));
        assert_eq!(report.candidate_slips.len(), 2);
    }

    #[test]
    fn test_validation_errors() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn);
        let boat = insert_test_boat(conn, 1, 34);
        let ctx = RequestContext::new(1.into());
        let rules = BookingRules::default();
        let run = |start: &str, end: &str, class: u32, boat: BoatSelection| {
            let request = AvailabilityRequest::new(start, end, class, boat);
            check_availability(conn, &ctx, &rules, today(), &request).unwrap_err()
        };

        assert!(matches!(
            run("2026-03-01", "2026-03-30", 40, BoatSelection::Existing(boat)),
            Error::StayTooShort { days: 29, .. }
        ));
        assert!(matches!(
            run("2026-01-01", "2026-03-01", 40, BoatSelection::Existing(boat)),
            Error::PastStartDate { .. }
        ));
        assert!(matches!(
            run("2026-04-01", "2026-03-01", 40, BoatSelection::Existing(boat)),
            Error::InvalidDateRange { .. }
        ));
        assert!(matches!(
            run("2026-03-01", "2026-04-01", 30, BoatSelection::Existing(boat)),
            Error::InvalidInput { .. }
        ));
        assert!(matches!(
            run("2026-03-01", "2026-04-01", 40, BoatSelection::Existing(BoatId::from(999))),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn test_foreign_boat_is_not_found() {
        let db = create_test_database();
        let conn = db.connection();
        seed(conn);
        let boat = insert_test_boat(conn, 1, 34);
        let stranger = RequestContext::new(2.into());

        let request = AvailabilityRequest::new(
            "2026-03-01",
            "2026-04-01",
            40,
            BoatSelection::Existing(boat),
        );
        let err = check_availability(conn, &stranger, &BookingRules::default(), today(), &request)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
