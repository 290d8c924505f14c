//! Slip reference data and the boat/slip compatibility check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlipId(i64);

impl SlipId {
    /// Returns the underlying row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for SlipId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SlipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical mooring space.
///
/// Slips are reference data: the booking workflow reads them but never
/// creates or removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slip {
    /// Slip identifier.
    pub id: SlipId,
    /// Size class in feet.
    pub size_feet: u32,
    /// Human-readable dock/position label, e.g. `B-12`.
    pub location: String,
    /// `false` when the slip is administratively out of service.
    pub in_service: bool,
}

impl fmt::Display for Slip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slip {} ({} ft, {})", self.id, self.size_feet, self.location)?;
        if !self.in_service {
            write!(f, " [out of service]")?;
        }
        Ok(())
    }
}

/// Checks that a slip is large enough for a boat.
///
/// Used for both an existing boat and a boat entered inline with a
/// reservation.
///
/// # Errors
///
/// Returns [`Error::SlipTooSmall`] when `slip_feet < boat_feet`.
///
/// # Examples
///
/// ```
/// use marina::slip::check_compatibility;
///
/// assert!(check_compatibility(34, 40).is_ok());
/// assert!(check_compatibility(40, 40).is_ok());
/// assert!(check_compatibility(45, 40).is_err());
/// ```
pub fn check_compatibility(boat_feet: u32, slip_feet: u32) -> Result<()> {
    if slip_feet < boat_feet {
        return Err(Error::SlipTooSmall {
            slip_feet,
            boat_feet,
        });
    }
    Ok(())
}

/// Smallest slip size that can be offered for a request.
///
/// This is the larger of the requested size class and the boat's length, so
/// a mis-selected class never yields a slip shorter than the boat.
#[must_use]
pub fn required_minimum_size(size_class: u32, boat_feet: u32) -> u32 {
    size_class.max(boat_feet)
}

/// Checks that `size_class` is one of the configured classes.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an unknown class.
pub fn validate_size_class(size_class: u32, classes: &[u32]) -> Result<()> {
    if classes.contains(&size_class) {
        Ok(())
    } else {
        Err(Error::invalid_input(
            "size_class",
            format!("{size_class} ft is not an offered slip size (choose from {classes:?})"),
        ))
    }
}
