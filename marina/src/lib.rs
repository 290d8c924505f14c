#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # marina
//!
//! Slip availability, booking and pricing for a marina.
//!
//! The core workflow: validate the requested stay, check that the boat
//! fits, list free slips of the requested size class, then claim one slip
//! atomically and price the stay. A slip, and likewise a boat, is never
//! held by two overlapping stays.
//!
//! ## Core Types
//!
//! - [`StayRange`] and [`StayPolicy`]: date ranges and the minimum-stay rule
//! - [`Slip`], [`Boat`] and [`Reservation`]: the stored records
//! - [`PricingCalculator`] and [`Money`]: cost computation in integer cents
//! - [`Marina`]: the service facade over an open [`Database`]
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use marina::{PricingCalculator, StayRange};
//!
//! let stay = StayRange::parse("2026-03-01", "2026-04-01").unwrap();
//! assert_eq!(stay.days(), 31);
//!
//! let calc = PricingCalculator::default();
//! let cost = calc.cost_for_stay(34, stay.days()).unwrap();
//! assert_eq!(cost.months, 1);
//! assert_eq!(cost.total.to_string(), "$367.50");
//! ```

pub mod boat;
pub mod config;
pub mod confirmation;
pub mod context;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod pricing;
pub mod reservation;
pub mod service;
pub mod slip;
pub mod stay;

// Re-export key types at crate root for convenience
pub use boat::{Boat, BoatId, BoatRegistry, BoatSelection, NewBoat};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use confirmation::{ConfirmationCodeSource, RandomCodeSource};
pub use context::{RequestContext, UserId};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{AvailabilityReport, BookingRules, Quote};
pub use pricing::{CostBreakdown, Money, PricingCalculator, PricingPolicy};
pub use reservation::{ConfirmationCode, Reservation, ReservationStatus};
pub use service::Marina;
pub use slip::{Slip, SlipId};
pub use stay::{Clock, FixedClock, LocalClock, StayPolicy, StayRange};
