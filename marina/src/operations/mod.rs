//! Booking workflow operations.
//!
//! Each operation takes an explicit [`RequestContext`](crate::RequestContext)
//! where identity matters, the [`BookingRules`] derived from configuration,
//! and the date the caller considers "today". Read-only operations take a
//! `&Connection`; anything that writes a reservation takes `&mut Database`
//! and runs inside an `IMMEDIATE` transaction.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use marina::operations::{check_availability, AvailabilityRequest, BookingRules};
//! use marina::{BoatSelection, Config, Database, DatabaseConfig, RequestContext};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/marina.db")).unwrap();
//! let rules = BookingRules::from_config(&Config::default());
//! let ctx = RequestContext::new(7.into());
//! let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
//!
//! let request = AvailabilityRequest::new("2026-03-01", "2026-04-01", 40, BoatSelection::existing(3));
//! let report = check_availability(db.connection(), &ctx, &rules, today, &request).unwrap();
//! println!("{} slip(s), estimate {}", report.candidate_slips.len(), report.estimate.total);
//! ```

pub mod allocate;
pub mod availability;
pub mod init;
pub mod manage;

#[cfg(test)]
mod proptests;

use crate::config::Config;
use crate::pricing::PricingCalculator;
use crate::stay::StayPolicy;

pub use allocate::{confirm_reservation, ReservationRequest};
pub use availability::{check_availability, AvailabilityReport, AvailabilityRequest};
pub use init::{init_database, InitOptions, InitResult};
pub use manage::{
    add_slip, cancel_reservation, complete_elapsed, find_reservation, list_boats,
    list_reservations, list_slips, quote, register_boat, remove_boat, reschedule_reservation,
    seed_slips, set_slip_in_service, Quote, RescheduleRequest,
};

/// Policy values every booking operation consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRules {
    /// Date validation.
    pub stay: StayPolicy,
    /// Cost computation.
    pub pricing: PricingCalculator,
    /// Offered slip size classes, ascending.
    pub size_classes: Vec<u32>,
    /// Longest boat accepted.
    pub max_boat_length_feet: u32,
    /// Confirmation codes tried before giving up.
    pub max_code_attempts: u32,
}

impl BookingRules {
    /// Extracts the rules from a (validated) configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            stay: config.stay_policy(),
            pricing: PricingCalculator::new(config.pricing_policy()),
            size_classes: config.size_classes(),
            max_boat_length_feet: config.max_boat_length_feet(),
            max_code_attempts: config.max_code_attempts(),
        }
    }
}

impl Default for BookingRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
