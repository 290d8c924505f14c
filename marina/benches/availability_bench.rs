use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tempfile::TempDir;

use marina::database::{Database, DatabaseConfig};
use marina::operations::{confirm_reservation, BookingRules, ReservationRequest};
use marina::{BoatRegistry, BoatSelection, NewBoat, RandomCodeSource, RequestContext, StayRange};

const SLIP_COUNTS: &[usize] = &[10, 100, 400];
const STAYS_PER_SLIP: u64 = 6;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
}

fn setup_database() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db = Database::open(DatabaseConfig::new(temp_dir.path().join("marina.db")))
        .expect("failed to open temporary database");
    (temp_dir, db)
}

/// Fills `slips` slips with back-to-back monthly stays, one boat per slip.
fn populate(db: &mut Database, slips: usize) {
    let rules = BookingRules::default();
    let codes = RandomCodeSource::default();
    let ctx = RequestContext::new(1.into());
    for i in 0..slips {
        let slip = Database::insert_slip(db.connection(), 40, &format!("S-{i}"))
            .expect("failed to insert slip");
        // a boat holds one stay at a time, so each slip gets its own
        let boat = db
            .connection()
            .create_boat(ctx.user_id, &NewBoat::new(&format!("Bench {i}"), 34, 50).expect("valid boat"))
            .expect("failed to create boat");
        for n in 0..STAYS_PER_SLIP {
            let start = today() + Days::new(n * 40);
            let end = start + Days::new(35);
            let request = ReservationRequest::new(
                &start.to_string(),
                &end.to_string(),
                slip.id,
                BoatSelection::Existing(boat.id),
            );
            confirm_reservation(db, &ctx, &rules, today(), &codes, &request)
                .expect("failed to book");
        }
    }
}

fn bench_find_available(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_available_slips");
    let stay = StayRange::parse("2026-02-20", "2026-03-25").expect("valid stay");

    for &size in SLIP_COUNTS {
        let (_temp_dir, mut db) = setup_database();
        populate(&mut db, size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let slips = Database::find_available_slips(db.connection(), 40, black_box(&stay))
                    .expect("query failed");
                black_box(slips);
            });
        });
    }

    group.finish();
}

fn bench_confirm(c: &mut Criterion) {
    let mut group = c.benchmark_group("confirm_reservation");
    let rules = BookingRules::default();
    let codes = RandomCodeSource::default();
    let ctx = RequestContext::new(2.into());

    for &size in SLIP_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &count| {
            b.iter_batched(
                || {
                    let (temp_dir, mut db) = setup_database();
                    populate(&mut db, count);
                    let slip = Database::insert_slip(db.connection(), 50, "FREE")
                        .expect("failed to insert slip");
                    (temp_dir, db, slip.id)
                },
                |(temp_dir, mut db, slip_id)| {
                    let _temp_dir = temp_dir;
                    let boat = BoatSelection::New(NewBoat::new("Racer", 40, 50).expect("valid boat"));
                    let request = ReservationRequest::new("2026-06-01", "2026-07-01", slip_id, boat);
                    let reservation = confirm_reservation(&mut db, &ctx, &rules, today(), &codes, &request)
                        .expect("failed to book");
                    black_box(reservation);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_available, bench_confirm);
criterion_main!(benches);
