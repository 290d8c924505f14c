//! Property-based tests for the booking operations.
//!
//! The central property: whatever sequence of bookings and cancellations
//! is attempted, the slip-holding reservations on any slip never overlap,
//! no boat is ever in two stays at once, and a booking succeeds exactly
//! when both the slip and the boat are free for its dates.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use crate::boat::{BoatId, BoatSelection};
use crate::confirmation::RandomCodeSource;
use crate::context::RequestContext;
use crate::database::test_util::{create_test_database, insert_test_boat};
use crate::database::Database;
use crate::error::Error;
use crate::pricing::PricingCalculator;
use crate::reservation::ConfirmationCode;
use crate::slip::SlipId;
use crate::stay::{StayPolicy, StayRange};

use super::{cancel_reservation, confirm_reservation, BookingRules, ReservationRequest};

const SLIPS: usize = 3;
const BOATS: usize = 2;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn shifted(offset: u64) -> NaiveDate {
    base_date() + Days::new(offset)
}

#[derive(Debug, Clone)]
enum Step {
    Book {
        slip: usize,
        boat: usize,
        offset: u64,
        days: u64,
    },
    Cancel {
        pick: usize,
    },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..SLIPS, 0..BOATS, 0u64..180, 1u64..60)
            .prop_map(|(slip, boat, offset, days)| Step::Book { slip, boat, offset, days }),
        1 => any::<usize>().prop_map(|pick| Step::Cancel { pick }),
    ]
}

fn stay_strategy() -> impl Strategy<Value = StayRange> {
    (0u64..365, 1u64..90).prop_map(|(offset, days)| {
        StayRange::new(shifted(offset), shifted(offset + days)).unwrap()
    })
}

fn short_stay_rules() -> BookingRules {
    BookingRules {
        stay: StayPolicy {
            minimum_stay_days: 1,
        },
        ..BookingRules::default()
    }
}

fn assert_no_overlap(db: &Database, slips: &[SlipId], boats: &[BoatId]) {
    for &slip in slips {
        let held = Database::list_holding_reservations(db.connection(), slip).unwrap();
        for (i, a) in held.iter().enumerate() {
            for b in &held[i + 1..] {
                assert!(
                    !a.stay().overlaps(b.stay()),
                    "slip {slip}: {} overlaps {}",
                    a.stay(),
                    b.stay()
                );
            }
        }
    }

    let holding: Vec<_> = Database::list_reservations_for_user(db.connection(), 1.into())
        .unwrap()
        .into_iter()
        .filter(|r| r.status().holds_slip())
        .collect();
    for &boat in boats {
        let stays: Vec<_> = holding.iter().filter(|r| r.boat_id() == boat).collect();
        for (i, a) in stays.iter().enumerate() {
            for b in &stays[i + 1..] {
                assert!(
                    !a.stay().overlaps(b.stay()),
                    "boat {boat}: {} overlaps {}",
                    a.stay(),
                    b.stay()
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    #[test]
    fn holding_reservations_never_overlap(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let mut db = create_test_database();
        let slips: Vec<SlipId> = (0..SLIPS)
            .map(|i| Database::insert_slip(db.connection(), 40, &format!("B-{i}")).unwrap().id)
            .collect();
        let boats: Vec<BoatId> = (0..BOATS)
            .map(|_| insert_test_boat(db.connection(), 1, 30))
            .collect();
        let ctx = RequestContext::new(1.into());
        let rules = short_stay_rules();
        let codes = RandomCodeSource::default();
        let today = base_date();

        // model of what should be held: (slip, boat, stay, code)
        let mut held: Vec<(SlipId, BoatId, StayRange, ConfirmationCode)> = Vec::new();

        for step in steps {
            match step {
                Step::Book { slip, boat, offset, days } => {
                    let stay = StayRange::new(shifted(offset), shifted(offset + days)).unwrap();
                    let slip_free = !held
                        .iter()
                        .any(|(s, _, other, _)| *s == slips[slip] && other.overlaps(&stay));
                    let boat_free = !held
                        .iter()
                        .any(|(_, b, other, _)| *b == boats[boat] && other.overlaps(&stay));

                    let request = ReservationRequest::new(
                        &stay.start().to_string(),
                        &stay.end().to_string(),
                        slips[slip],
                        BoatSelection::Existing(boats[boat]),
                    );
                    match confirm_reservation(&mut db, &ctx, &rules, today, &codes, &request) {
                        Ok(reservation) => {
                            prop_assert!(slip_free && boat_free, "booked {stay} while held");
                            held.push((slips[slip], boats[boat], stay, reservation.code().clone()));
                        }
                        Err(Error::SlipNoLongerAvailable { .. }) => {
                            prop_assert!(!slip_free, "rejected {stay} on a free slip");
                        }
                        Err(Error::BoatAlreadyBooked { .. }) => {
                            prop_assert!(slip_free && !boat_free, "rejected {stay} for a free boat");
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other}"),
                    }
                }
                Step::Cancel { pick } => {
                    if !held.is_empty() {
                        let (_, _, _, code) = held.remove(pick % held.len());
                        cancel_reservation(&mut db, &ctx, &code).unwrap();
                    }
                }
            }
            assert_no_overlap(&db, &slips, &boats);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn overlap_matches_shared_day(a in stay_strategy(), b in stay_strategy()) {
        let shares_a_day = a.start().max(b.start()) <= a.end().min(b.end());
        prop_assert_eq!(a.overlaps(&b), shares_a_day);
    }

    #[test]
    fn cost_is_linear(length in 1i64..=100, months in 1i64..=24) {
        let calc = PricingCalculator::default();
        let cost = calc.cost(length, months).unwrap();
        prop_assert_eq!(cost.total.cents(), length * 1050 + months * 1050);
        prop_assert_eq!(cost.base.cents() + cost.hookup.cents(), cost.total.cents());
    }

    #[test]
    fn months_cover_the_billable_days(days in 1i64..=400) {
        let calc = PricingCalculator::default();
        let months = i64::from(calc.months_for_days(days));
        prop_assert!(months >= 1);
        prop_assert!(months * 30 >= days - 1);
        prop_assert!(months == 1 || (months - 1) * 30 < days - 1);
    }
}
