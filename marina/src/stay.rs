//! Stay date ranges and the date/duration policy.
//!
//! A stay is a contiguous range of calendar dates. Two stays overlap when
//! neither ends before the other begins, boundary dates included: a stay
//! ending on the day another starts conflicts with it, leaving the slip a
//! turnover day.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format accepted for stay boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default minimum stay, in days.
pub const DEFAULT_MINIMUM_STAY_DAYS: u32 = 30;

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`Error::InvalidDateRange`] if the text is not a valid date.
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| Error::InvalidDateRange {
        reason: format!("{field} '{text}' is not a YYYY-MM-DD date: {e}"),
    })
}

/// A stay from `start` through `end`, with `end` strictly after `start`.
///
/// # Examples
///
/// ```
/// use marina::StayRange;
///
/// let march = StayRange::parse("2026-03-01", "2026-04-01").unwrap();
/// assert_eq!(march.days(), 31);
///
/// let overlapping = StayRange::parse("2026-03-15", "2026-04-15").unwrap();
/// assert!(march.overlaps(&overlapping));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl StayRange {
    /// Creates a new stay range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if `end` is not after `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidDateRange {
                reason: format!("end date {end} must be after start date {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both boundaries and builds the range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if either date is unparseable or
    /// the range is empty or inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date("start date", start)?;
        let end = parse_date("end date", end)?;
        Self::new(start, end)
    }

    /// Returns the first day of the stay.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the stay.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between start and end.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Inclusive overlap test: `NOT (self.end < other.start OR self.start > other.end)`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end < other.start || self.start > other.end)
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Source of "today" for date validation.
///
/// Production code uses [`LocalClock`]; tests and the CLI's `--today`
/// option pin the date with [`FixedClock`].
pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// The server's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The minimum-stay and no-past-dates policy.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use marina::{StayPolicy, StayRange};
///
/// let policy = StayPolicy::default();
/// let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
///
/// let ok = StayRange::parse("2026-03-01", "2026-03-31").unwrap();
/// assert!(policy.validate(&ok, today).is_ok());
///
/// let short = StayRange::parse("2026-03-01", "2026-03-30").unwrap();
/// assert!(policy.validate(&short, today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPolicy {
    /// Shortest stay accepted, in days.
    pub minimum_stay_days: u32,
}

impl Default for StayPolicy {
    fn default() -> Self {
        Self {
            minimum_stay_days: DEFAULT_MINIMUM_STAY_DAYS,
        }
    }
}

impl StayPolicy {
    /// Validates a stay against today's date and the minimum stay.
    ///
    /// # Errors
    ///
    /// - [`Error::PastStartDate`] if the stay starts before `today`
    /// - [`Error::StayTooShort`] if it is shorter than the minimum
    pub fn validate(&self, range: &StayRange, today: NaiveDate) -> Result<()> {
        if range.start() < today {
            return Err(Error::PastStartDate {
                start: range.start(),
                today,
            });
        }

        let days = range.days();
        if days < i64::from(self.minimum_stay_days) {
            return Err(Error::StayTooShort {
                days,
                minimum: self.minimum_stay_days,
            });
        }

        Ok(())
    }

    /// Parses and validates a stay in one step.
    ///
    /// Checks run in order: both dates parse, the start is not in the past,
    /// the range is not inverted, the stay meets the minimum.
    ///
    /// # Errors
    ///
    /// Returns any error from [`StayRange::parse`] or [`StayPolicy::validate`].
    pub fn parse_and_validate(&self, start: &str, end: &str, today: NaiveDate) -> Result<StayRange> {
        let start = parse_date("start date", start)?;
        let end = parse_date("end date", end)?;
        if start < today {
            return Err(Error::PastStartDate { start, today });
        }
        let range = StayRange::new(start, end)?;
        self.validate(&range, today)?;
        Ok(range)
    }
}
