//! CLI command implementations.
//!
//! - `init`: Create the data directory, database and seed slips
//! - `slip`: Add, list, disable and enable slips
//! - `boat`: Register, list and remove the caller's boats
//! - `availability`: List slips free for a stay
//! - `reserve`: Book a slip
//! - `reservations`: List the caller's reservations
//! - `show`: Show one reservation
//! - `cancel`: Cancel a reservation
//! - `reschedule`: Move a reservation to new dates
//! - `complete_elapsed`: Mark finished stays as completed
//! - `quote`: Price a stay without booking
//! - `completions`: Shell completion scripts

pub mod availability;
pub mod boat;
pub mod cancel;
pub mod complete_elapsed;
pub mod completions;
pub mod init;
pub mod quote;
pub mod reschedule;
pub mod reservations;
pub mod reserve;
pub mod show;
pub mod slip;

pub use availability::AvailabilityCommand;
pub use boat::BoatCommand;
pub use cancel::CancelCommand;
pub use complete_elapsed::CompleteElapsedCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use quote::QuoteCommand;
pub use reschedule::RescheduleCommand;
pub use reservations::ReservationsCommand;
pub use reserve::ReserveCommand;
pub use show::ShowCommand;
pub use slip::SlipCommand;
