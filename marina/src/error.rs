//! Error types for the marina library.
//!
//! This module provides the error hierarchy for slip availability, booking
//! and account operations, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for operations that may fail with a marina error.
///
/// # Examples
///
/// ```
/// use marina::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(40)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the marina library.
///
/// Validation failures (`InvalidDateRange`, `PastStartDate`, `StayTooShort`,
/// `SlipTooSmall`, `InvalidInput`, `Validation`) are rejected requests with a
/// human-readable reason. `DataStoreUnavailable` is transient.
/// `SlipNoLongerAvailable` is the expected outcome of losing a booking race.
#[derive(Debug, Error)]
pub enum Error {
    /// A date could not be parsed, or the range is empty or inverted.
    #[error("invalid date range: {reason}")]
    InvalidDateRange {
        /// Why the range was rejected.
        reason: String,
    },

    /// The stay would start before today.
    #[error("start date {start} is in the past (today is {today})")]
    PastStartDate {
        /// The requested start date.
        start: NaiveDate,
        /// The server's current date.
        today: NaiveDate,
    },

    /// The stay is shorter than the minimum-stay policy.
    #[error("stay of {days} day(s) is shorter than the {minimum}-day minimum")]
    StayTooShort {
        /// Length of the requested stay in days.
        days: i64,
        /// Minimum stay required by policy.
        minimum: u32,
    },

    /// The slip is smaller than the boat.
    #[error("slip size {slip_feet} ft is too small for a {boat_feet} ft boat")]
    SlipTooSmall {
        /// Size of the slip in feet.
        slip_feet: u32,
        /// Length of the boat in feet.
        boat_feet: u32,
    },

    /// An input value is out of its accepted domain.
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput {
        /// The offending input.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A configuration or identifier validation error.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The relational store failed or timed out.
    #[error("data store unavailable: {source}")]
    DataStoreUnavailable {
        /// The underlying storage error.
        #[from]
        source: rusqlite::Error,
    },

    /// The chosen slip was claimed by another booking or taken out of service.
    #[error("slip {slip_id} is no longer available for the requested dates")]
    SlipNoLongerAvailable {
        /// The slip that could not be claimed.
        slip_id: i64,
    },

    /// The boat already holds a reservation for overlapping dates.
    #[error("boat {boat_id} is already booked for overlapping dates")]
    BoatAlreadyBooked {
        /// The boat that is already booked.
        boat_id: i64,
    },

    /// The requested resource was not found (or is not visible to the caller).
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A reservation status change that the lifecycle does not allow.
    #[error("reservation {code} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Confirmation code of the reservation.
        code: String,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// A boat cannot be removed while reservations reference it.
    #[error("boat {boat_id} has reservation history and cannot be removed")]
    BoatInUse {
        /// The boat that is still referenced.
        boat_id: i64,
    },

    /// Every generated confirmation code collided with an existing one.
    #[error("could not generate a unique confirmation code after {attempts} attempt(s)")]
    ConfirmationCodeExhausted {
        /// Number of codes tried.
        attempts: u32,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration file {}: {source}", path.display())]
    Configuration {
        /// The file that failed to parse.
        path: PathBuf,
        /// The YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Check if the error is a rejected request that should not be retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use marina::Error;
    ///
    /// let err = Error::SlipTooSmall { slip_feet: 40, boat_feet: 45 };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. }
                | Self::PastStartDate { .. }
                | Self::StayTooShort { .. }
                | Self::SlipTooSmall { .. }
                | Self::InvalidInput { .. }
                | Self::Validation { .. }
        )
    }

    /// Check if the error is a transient storage failure.
    ///
    /// Callers may retry with backoff but must not assume success.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DataStoreUnavailable { .. })
    }

    /// Check if the error means the stay collides with another booking,
    /// either on the slip or for the boat.
    ///
    /// # Examples
    ///
    /// ```
    /// use marina::Error;
    ///
    /// let err = Error::SlipNoLongerAvailable { slip_id: 3 };
    /// assert!(err.is_conflict());
    /// assert!(!err.is_transient());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SlipNoLongerAvailable { .. } | Self::BoatAlreadyBooked { .. }
        )
    }

    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}
