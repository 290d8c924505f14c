//! Concurrent allocation tests.
//!
//! Every thread opens its own connection to the same database file, the
//! way separate server processes would. Allocators racing for one slip
//! must produce exactly one winner.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use common::{open, user, MarinaFixture};
use marina::database::DATABASE_FILE_NAME;
use marina::{BoatSelection, Config, Error, NewBoat, Reservation, Result};

fn race(fixture: &MarinaFixture, attempts: Vec<(&'static str, &'static str)>) -> Vec<Result<Reservation>> {
    let slip = fixture.slip("B-1").id;
    let barrier = Arc::new(Barrier::new(attempts.len()));

    let handles: Vec<_> = attempts
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| {
            let data_dir = fixture.data_dir();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut marina = open(&data_dir, Config::default());
                let ctx = user(i64::try_from(i).unwrap() + 1);
                let boat = BoatSelection::New(NewBoat::new(&format!("Racer {i}"), 34, 50).unwrap());
                barrier.wait();
                marina.confirm_reservation(&ctx, start, end, slip, boat)
            })
        })
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

#[test]
fn test_two_allocators_one_winner() {
    let fixture = MarinaFixture::new().with_standard_slips();

    let results = race(
        &fixture,
        vec![("2026-03-01", "2026-04-01"), ("2026-03-15", "2026-04-15")],
    );

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "results: {results:?}");
    for result in &results {
        if let Err(err) = result {
            assert!(
                matches!(err, Error::SlipNoLongerAvailable { .. }),
                "unexpected error {err}"
            );
        }
    }
}

#[test]
fn test_many_allocators_same_dates() {
    let fixture = MarinaFixture::new().with_standard_slips();

    let results = race(&fixture, vec![("2026-05-01", "2026-06-01"); 8]);

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(Error::is_conflict));

    // losers' inline boats were rolled back with their transactions
    let boats: usize = (1..=8)
        .map(|id| fixture.marina.list_boats(&user(id)).unwrap().len())
        .sum();
    assert_eq!(boats, 1);
}

#[test]
fn test_disjoint_stays_all_succeed() {
    let fixture = MarinaFixture::new().with_standard_slips();

    let results = race(
        &fixture,
        vec![
            ("2026-03-01", "2026-03-31"),
            ("2026-04-01", "2026-05-01"),
            ("2026-05-02", "2026-06-02"),
            ("2026-06-03", "2026-07-03"),
        ],
    );

    assert!(results.iter().all(|r| r.is_ok()), "results: {results:?}");
}

#[test]
fn test_one_boat_racing_for_two_slips() {
    let fixture = MarinaFixture::new().with_standard_slips();
    let boat = fixture.marina.register_boat(&user(1), "Sea Biscuit", 34).unwrap();
    let slips = [fixture.slip("B-1").id, fixture.slip("B-2").id];
    let barrier = Arc::new(Barrier::new(slips.len()));

    let handles: Vec<_> = slips
        .into_iter()
        .map(|slip| {
            let data_dir = fixture.data_dir();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut marina = open(&data_dir, Config::default());
                barrier.wait();
                marina.confirm_reservation(
                    &user(1),
                    "2026-03-01",
                    "2026-04-01",
                    slip,
                    BoatSelection::Existing(boat.id),
                )
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1, "results: {results:?}");
    for result in &results {
        if let Err(err) = result {
            assert!(
                matches!(err, Error::BoatAlreadyBooked { boat_id } if *boat_id == boat.id.value()),
                "unexpected error {err}"
            );
        }
    }
}

#[test]
fn test_held_write_lock_reports_unavailable() {
    let fixture = MarinaFixture::new().with_standard_slips();
    let slip = fixture.slip("B-1").id;

    let blocker = rusqlite::Connection::open(fixture.dir.path().join(DATABASE_FILE_NAME)).unwrap();
    blocker.execute_batch("BEGIN IMMEDIATE").unwrap();

    let config = Config {
        maximum_lock_wait_seconds: Some(1),
        ..Config::default()
    };
    let mut marina = open(&fixture.data_dir(), config);
    let boat = BoatSelection::New(NewBoat::new("Stuck", 34, 50).unwrap());

    let started = Instant::now();
    let err = marina
        .confirm_reservation(&user(1), "2026-03-01", "2026-04-01", slip, boat)
        .unwrap_err();

    assert!(matches!(err, Error::DataStoreUnavailable { .. }), "unexpected error {err}");
    assert!(err.is_transient());
    assert!(started.elapsed() < Duration::from_secs(10));

    blocker.execute_batch("ROLLBACK").unwrap();
    let boat = BoatSelection::New(NewBoat::new("Unstuck", 34, 50).unwrap());
    marina
        .confirm_reservation(&user(1), "2026-03-01", "2026-04-01", slip, boat)
        .unwrap();
}
