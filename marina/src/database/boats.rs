//! `SQLite` implementation of the boat registry.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::boat::{owned_boat, Boat, BoatId, BoatRegistry, NewBoat};
use crate::context::UserId;
use crate::error::{Error, Result};

use super::connection::Database;
use super::queries::systemtime_to_unix_secs;

const SELECT_BOAT: &str = "SELECT id, owner_id, name, length_feet FROM boats WHERE id = ?";

const INSERT_BOAT: &str =
    "INSERT INTO boats (owner_id, name, length_feet, created_at) VALUES (?, ?, ?, ?)";

const LIST_BOATS: &str =
    "SELECT id, owner_id, name, length_feet FROM boats WHERE owner_id = ? ORDER BY id";

const DELETE_BOAT: &str = "DELETE FROM boats WHERE id = ?";

fn row_to_boat(row: &rusqlite::Row<'_>) -> rusqlite::Result<Boat> {
    Ok(Boat {
        id: BoatId::from(row.get::<_, i64>(0)?),
        owner_id: UserId::from(row.get::<_, i64>(1)?),
        name: row.get(2)?,
        length_feet: row.get(3)?,
    })
}

impl BoatRegistry for Connection {
    fn get_boat(&self, id: BoatId) -> Result<Option<Boat>> {
        Ok(self
            .query_row(SELECT_BOAT, [id.value()], row_to_boat)
            .optional()?)
    }

    fn create_boat(&self, owner: UserId, boat: &NewBoat) -> Result<Boat> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        self.execute(
            INSERT_BOAT,
            params![owner.value(), boat.name(), boat.length_feet(), now],
        )?;

        let id = BoatId::from(self.last_insert_rowid());
        log::debug!("registered boat {id} for user {owner}");
        Ok(Boat {
            id,
            owner_id: owner,
            name: boat.name().to_string(),
            length_feet: boat.length_feet(),
        })
    }

    fn list_boats(&self, owner: UserId) -> Result<Vec<Boat>> {
        let mut stmt = self.prepare(LIST_BOATS)?;
        let boats = stmt
            .query_map([owner.value()], row_to_boat)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(boats)
    }

    fn delete_boat(&self, owner: UserId, id: BoatId) -> Result<()> {
        let boat = owned_boat(self, owner, id)?;
        if Database::count_reservations_for_boat(self, boat.id)? > 0 {
            return Err(Error::BoatInUse {
                boat_id: boat.id.value(),
            });
        }
        self.execute(DELETE_BOAT, [boat.id.value()])?;
        log::debug!("removed boat {id} for user {owner}");
        Ok(())
    }
}
