//! Reservation types.
//!
//! A reservation binds one boat to one slip for a stay. Reservations are
//! never deleted; canceling one is a status change that keeps the row for
//! audit history.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::boat::BoatId;
use crate::context::UserId;
use crate::pricing::Money;
use crate::slip::SlipId;
use crate::stay::StayRange;

/// Lifecycle state of a reservation.
///
/// ```text
/// confirmed --cancel--> canceled
/// confirmed --stay elapses--> completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The slip is held for the stay.
    Confirmed,
    /// Canceled by its owner; the slip is free again.
    Canceled,
    /// The stay has ended.
    Completed,
}

impl ReservationStatus {
    /// The value stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }

    /// Whether a reservation in this state still holds its slip.
    #[must_use]
    pub const fn holds_slip(self) -> bool {
        !matches!(self, Self::Canceled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status '{other}'"),
            }),
        }
    }
}

/// A human-presentable, unique confirmation code such as `SLP-7K2M9QX4TB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Wraps a code, normalizing it to upper case.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is blank or contains characters other
    /// than ASCII letters, digits and dashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use marina::ConfirmationCode;
    ///
    /// let code = ConfirmationCode::new("slp-7k2m9qx4tb").unwrap();
    /// assert_eq!(code.as_str(), "SLP-7K2M9QX4TB");
    /// assert!(ConfirmationCode::new("").is_err());
    /// ```
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "confirmation_code".into(),
                message: "confirmation code must be non-empty".into(),
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ValidationError {
                field: "confirmation_code".into(),
                message: format!("'{trimmed}' contains invalid characters"),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Wraps text already drawn from the code alphabet.
    pub(crate) fn generated(code: String) -> Self {
        Self(code)
    }

    /// The code as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: i64,
    code: ConfirmationCode,
    user_id: UserId,
    boat_id: BoatId,
    slip_id: SlipId,
    stay: StayRange,
    months: u32,
    total: Money,
    status: ReservationStatus,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl Reservation {
    /// Starts building a reservation for `slip_id` over `stay`.
    #[must_use]
    pub fn builder(code: ConfirmationCode, slip_id: SlipId, stay: StayRange) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            code,
            user_id: None,
            boat_id: None,
            slip_id,
            stay,
            months: 1,
            total: None,
            status: ReservationStatus::Confirmed,
            created_at: None,
            updated_at: None,
        }
    }

    /// Row id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Confirmation code.
    #[must_use]
    pub const fn code(&self) -> &ConfirmationCode {
        &self.code
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Booked boat.
    #[must_use]
    pub const fn boat_id(&self) -> BoatId {
        self.boat_id
    }

    /// Claimed slip.
    #[must_use]
    pub const fn slip_id(&self) -> SlipId {
        self.slip_id
    }

    /// Dates of the stay.
    #[must_use]
    pub const fn stay(&self) -> &StayRange {
        &self.stay
    }

    /// Billed months.
    #[must_use]
    pub const fn months(&self) -> u32 {
        self.months
    }

    /// Total cost.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Time of the last status or date change.
    #[must_use]
    pub const fn updated_at(&self) -> SystemTime {
        self.updated_at
    }
}

/// Builder for [`Reservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<i64>,
    code: ConfirmationCode,
    user_id: Option<UserId>,
    boat_id: Option<BoatId>,
    slip_id: SlipId,
    stay: StayRange,
    months: u32,
    total: Option<Money>,
    status: ReservationStatus,
    created_at: Option<SystemTime>,
    updated_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the row id.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the owning user.
    #[must_use]
    pub const fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Sets the booked boat.
    #[must_use]
    pub const fn boat(mut self, boat_id: BoatId) -> Self {
        self.boat_id = Some(boat_id);
        self
    }

    /// Sets billed months and total cost.
    #[must_use]
    pub const fn cost(mut self, months: u32, total: Money) -> Self {
        self.months = months;
        self.total = Some(total);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last-change timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: SystemTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the id, owner, boat or cost is missing, if
    /// `months` is zero, or if the total is negative.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        let missing = |field: &str| ValidationError {
            field: field.into(),
            message: "is required".into(),
        };

        let id = self.id.ok_or_else(|| missing("id"))?;
        let user_id = self.user_id.ok_or_else(|| missing("user_id"))?;
        let boat_id = self.boat_id.ok_or_else(|| missing("boat_id"))?;
        let total = self.total.ok_or_else(|| missing("total"))?;

        if self.months == 0 {
            return Err(ValidationError {
                field: "months".into(),
                message: "at least one month is billed".into(),
            });
        }
        if total.cents() < 0 {
            return Err(ValidationError {
                field: "total".into(),
                message: "total cost cannot be negative".into(),
            });
        }

        let now = SystemTime::now();
        let created_at = self.created_at.unwrap_or(now);
        Ok(Reservation {
            id,
            code: self.code,
            user_id,
            boat_id,
            slip_id: self.slip_id,
            stay: self.stay,
            months: self.months,
            total,
            status: self.status,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        })
    }
}

/// Error type for reservation field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stay() -> StayRange {
        StayRange::parse("2026-03-01", "2026-04-01").unwrap()
    }

    fn code() -> ConfirmationCode {
        ConfirmationCode::new("SLP-TEST0001").unwrap()
    }

    #[test]
    fn test_builder_defaults_to_confirmed() {
        let reservation = Reservation::builder(code(), SlipId::from(1), stay())
            .id(10)
            .user(UserId::from(7))
            .boat(BoatId::from(3))
            .cost(1, Money::from_cents(36_750))
            .build()
            .unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
        assert_eq!(reservation.id(), 10);
        assert_eq!(reservation.total(), Money::from_cents(36_750));
        assert_eq!(reservation.created_at(), reservation.updated_at());
    }

    #[test]
    fn test_builder_requires_owner_and_boat() {
        let err = Reservation::builder(code(), SlipId::from(1), stay())
            .id(1)
            .boat(BoatId::from(3))
            .cost(1, Money::from_cents(100))
            .build()
            .unwrap_err();
        assert_eq!(err.field, "user_id");

        let err = Reservation::builder(code(), SlipId::from(1), stay())
            .id(1)
            .user(UserId::from(7))
            .cost(1, Money::from_cents(100))
            .build()
            .unwrap_err();
        assert_eq!(err.field, "boat_id");
    }

    #[test]
    fn test_builder_rejects_zero_months() {
        let err = Reservation::builder(code(), SlipId::from(1), stay())
            .id(1)
            .user(UserId::from(7))
            .boat(BoatId::from(3))
            .cost(0, Money::from_cents(100))
            .build()
            .unwrap_err();
        assert_eq!(err.field, "months");
    }

    #[test]
    fn test_status_round_trip_and_holding() {
        for status in [
            ReservationStatus::Confirmed,
            ReservationStatus::Canceled,
            ReservationStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
        assert!(ReservationStatus::Confirmed.holds_slip());
        assert!(ReservationStatus::Completed.holds_slip());
        assert!(!ReservationStatus::Canceled.holds_slip());
        assert!("pending".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_confirmation_code_rejects_symbols() {
        assert!(ConfirmationCode::new("SLP 123").is_err());
        assert!(ConfirmationCode::new("SLP_123").is_err());
        assert!(ConfirmationCode::new("SLP-123").is_ok());
    }
}
