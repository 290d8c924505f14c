//! Database schema definitions and SQL constants.
//!
//! Dates are ISO-8601 `YYYY-MM-DD` text, so string comparison is
//! chronological comparison. Money is integer cents. Timestamps are Unix
//! seconds.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Marker raised by the slip overlap triggers.
pub const OVERLAP_MARKER: &str = "slip_overlap";

/// Marker raised by the boat overlap triggers.
pub const BOAT_OVERLAP_MARKER: &str = "boat_overlap";

/// Key-value store for versioning.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Slip reference data.
pub const CREATE_SLIPS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS slips (
        id INTEGER PRIMARY KEY,
        size_feet INTEGER NOT NULL CHECK (size_feet > 0),
        location TEXT NOT NULL UNIQUE,
        in_service INTEGER NOT NULL DEFAULT 1
    )";

/// Registered boats.
pub const CREATE_BOATS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS boats (
        id INTEGER PRIMARY KEY,
        owner_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        length_feet INTEGER NOT NULL CHECK (length_feet > 0),
        created_at INTEGER NOT NULL
    )";

/// Reservations. Rows are never deleted; cancellation is a status change.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY,
        confirmation_code TEXT NOT NULL UNIQUE,
        user_id INTEGER NOT NULL,
        boat_id INTEGER NOT NULL REFERENCES boats(id),
        slip_id INTEGER NOT NULL REFERENCES slips(id),
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        months INTEGER NOT NULL CHECK (months >= 1),
        total_cents INTEGER NOT NULL CHECK (total_cents >= 0),
        status TEXT NOT NULL CHECK (status IN ('confirmed', 'canceled', 'completed')),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (end_date > start_date)
    )";

/// Speeds up the per-slip overlap check.
pub const CREATE_SLIP_DATES_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_slip_dates
    ON reservations(slip_id, start_date, end_date)";

/// Speeds up per-user listings.
pub const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// Speeds up the boat-in-use check and the per-boat overlap check.
pub const CREATE_BOAT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_boat
    ON reservations(boat_id, start_date, end_date)";

/// Speeds up per-owner boat listings.
pub const CREATE_BOAT_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_boats_owner ON boats(owner_id)";

/// Rejects an insert that would overlap a slip-holding reservation.
pub const CREATE_OVERLAP_INSERT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_no_overlap_insert
    BEFORE INSERT ON reservations
    WHEN NEW.status <> 'canceled'
    BEGIN
        SELECT RAISE(ABORT, 'slip_overlap')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.slip_id = NEW.slip_id
              AND r.status <> 'canceled'
              AND NOT (r.end_date < NEW.start_date OR r.start_date > NEW.end_date)
        );
    END";

/// Rejects an update that would make a row overlap another holding row.
pub const CREATE_OVERLAP_UPDATE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_no_overlap_update
    BEFORE UPDATE OF slip_id, start_date, end_date, status ON reservations
    WHEN NEW.status <> 'canceled'
    BEGIN
        SELECT RAISE(ABORT, 'slip_overlap')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.slip_id = NEW.slip_id
              AND r.id <> NEW.id
              AND r.status <> 'canceled'
              AND NOT (r.end_date < NEW.start_date OR r.start_date > NEW.end_date)
        );
    END";

/// Rejects an insert that would put a boat in two stays at once.
pub const CREATE_BOAT_OVERLAP_INSERT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_no_boat_overlap_insert
    BEFORE INSERT ON reservations
    WHEN NEW.status <> 'canceled'
    BEGIN
        SELECT RAISE(ABORT, 'boat_overlap')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.boat_id = NEW.boat_id
              AND r.status <> 'canceled'
              AND NOT (r.end_date < NEW.start_date OR r.start_date > NEW.end_date)
        );
    END";

/// Rejects an update that would put a boat in two stays at once.
pub const CREATE_BOAT_OVERLAP_UPDATE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_no_boat_overlap_update
    BEFORE UPDATE OF boat_id, start_date, end_date, status ON reservations
    WHEN NEW.status <> 'canceled'
    BEGIN
        SELECT RAISE(ABORT, 'boat_overlap')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.boat_id = NEW.boat_id
              AND r.id <> NEW.id
              AND r.status <> 'canceled'
              AND NOT (r.end_date < NEW.start_date OR r.start_date > NEW.end_date)
        );
    END";

/// Selects the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Stores the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query, in `row_to_reservation`
/// order.
pub const RESERVATION_COLUMNS: &str = "id, confirmation_code, user_id, boat_id, slip_id, \
     start_date, end_date, months, total_cents, status, created_at, updated_at";
