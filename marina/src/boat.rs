//! Boats and the boat registry boundary.
//!
//! Boats are owned by exactly one user. The booking workflow only needs to
//! look a boat up and, when a boat is entered inline with a reservation, to
//! create one; [`BoatRegistry`] is that narrow interface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::UserId;
use crate::error::{Error, Result};

/// Default upper bound on boat length, in feet.
pub const DEFAULT_MAX_BOAT_LENGTH_FEET: u32 = 50;

/// Longest accepted boat name, in characters.
const MAX_NAME_LEN: usize = 100;

/// Identifier of a boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoatId(i64);

impl BoatId {
    /// Returns the underlying row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for BoatId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BoatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boat {
    /// Boat identifier.
    pub id: BoatId,
    /// Owning user.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Length overall, in feet.
    pub length_feet: u32,
}

/// A boat that has not been registered yet.
///
/// # Examples
///
/// ```
/// use marina::NewBoat;
///
/// let boat = NewBoat::new("Sea Biscuit", 34, 50).unwrap();
/// assert_eq!(boat.name(), "Sea Biscuit");
///
/// assert!(NewBoat::new("Leviathan", 51, 50).is_err());
/// assert!(NewBoat::new("   ", 20, 50).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoat {
    name: String,
    length_feet: u32,
}

impl NewBoat {
    /// Validates a name and length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the name is blank or too long, or
    /// the length is outside `1..=max_length_feet`.
    pub fn new(name: &str, length_feet: u32, max_length_feet: u32) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("boat name", "cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(Error::invalid_input(
                "boat name",
                format!("cannot exceed {MAX_NAME_LEN} characters"),
            ));
        }
        validate_length(length_feet, max_length_feet)?;

        Ok(Self {
            name: trimmed.to_string(),
            length_feet,
        })
    }

    /// The trimmed boat name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in feet.
    #[must_use]
    pub const fn length_feet(&self) -> u32 {
        self.length_feet
    }
}

/// Checks a boat length against `1..=max_length_feet`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an out-of-range length.
pub fn validate_length(length_feet: u32, max_length_feet: u32) -> Result<()> {
    if length_feet == 0 || length_feet > max_length_feet {
        return Err(Error::invalid_input(
            "boat length",
            format!("{length_feet} ft is outside 1..={max_length_feet} ft"),
        ));
    }
    Ok(())
}

/// Which boat a booking request is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoatSelection {
    /// A boat the caller already registered.
    Existing(BoatId),
    /// A boat entered as part of the same submission.
    New(NewBoat),
}

impl BoatSelection {
    /// Convenience constructor for an existing boat.
    #[must_use]
    pub fn existing(id: impl Into<BoatId>) -> Self {
        Self::Existing(id.into())
    }
}

/// Narrow interface to the boat store.
///
/// Implemented for `rusqlite::Connection`, so the same calls work on a plain
/// connection and inside a transaction (which dereferences to one).
pub trait BoatRegistry {
    /// Looks up a boat by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_boat(&self, id: BoatId) -> Result<Option<Boat>>;

    /// Registers a boat for `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn create_boat(&self, owner: UserId, boat: &NewBoat) -> Result<Boat>;

    /// Lists the boats owned by `owner`, by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_boats(&self, owner: UserId) -> Result<Vec<Boat>>;

    /// Removes a boat owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown or foreign boat and
    /// [`Error::BoatInUse`] if reservations reference it.
    fn delete_boat(&self, owner: UserId, id: BoatId) -> Result<()>;
}

/// Fetches a boat and checks that `owner` owns it.
///
/// Foreign boats are reported as not found.
///
/// # Errors
///
/// Returns [`Error::NotFound`] or any registry error.
pub fn owned_boat(registry: &impl BoatRegistry, owner: UserId, id: BoatId) -> Result<Boat> {
    match registry.get_boat(id)? {
        Some(boat) if boat.owner_id == owner => Ok(boat),
        _ => Err(Error::not_found(format!("boat {id}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_boat_trims_name() {
        let boat = NewBoat::new("  Wind Dancer ", 26, 50).unwrap();
        assert_eq!(boat.name(), "Wind Dancer");
        assert_eq!(boat.length_feet(), 26);
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_length(1, 50).is_ok());
        assert!(validate_length(50, 50).is_ok());
        assert!(matches!(validate_length(0, 50), Err(Error::InvalidInput { .. })));
        assert!(matches!(validate_length(51, 50), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_name_too_long() {
        let name = "x".repeat(101);
        assert!(NewBoat::new(&name, 20, 50).is_err());
    }
}
