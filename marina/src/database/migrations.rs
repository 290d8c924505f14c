//! Database schema management and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOATS_TABLE, CREATE_BOAT_INDEX, CREATE_BOAT_OVERLAP_INSERT_TRIGGER,
    CREATE_BOAT_OVERLAP_UPDATE_TRIGGER, CREATE_BOAT_OWNER_INDEX, CREATE_METADATA_TABLE,
    CREATE_OVERLAP_INSERT_TRIGGER, CREATE_OVERLAP_UPDATE_TRIGGER, CREATE_RESERVATIONS_TABLE,
    CREATE_SLIPS_TABLE, CREATE_SLIP_DATES_INDEX, CREATE_USER_INDEX, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, triggers and the version marker in one
/// transaction.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use marina::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let statements = [
        CREATE_METADATA_TABLE,
        CREATE_SLIPS_TABLE,
        CREATE_BOATS_TABLE,
        CREATE_RESERVATIONS_TABLE,
        CREATE_SLIP_DATES_INDEX,
        CREATE_USER_INDEX,
        CREATE_BOAT_INDEX,
        CREATE_BOAT_OWNER_INDEX,
        CREATE_OVERLAP_INSERT_TRIGGER,
        CREATE_OVERLAP_UPDATE_TRIGGER,
        CREATE_BOAT_OVERLAP_INSERT_TRIGGER,
        CREATE_BOAT_OVERLAP_UPDATE_TRIGGER,
    ];

    let tx = conn.unchecked_transaction()?;
    for statement in statements {
        tx.execute_batch(statement)?;
    }
    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    tx.commit()?;

    log::info!("initialized schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
            })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes a fresh database.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version is not
/// the current one, or any database error.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
