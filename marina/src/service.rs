//! The `Marina` service facade.
//!
//! Bundles an open [`Database`], the effective [`Config`], a [`Clock`] and a
//! [`ConfirmationCodeSource`], and exposes every booking operation with
//! the policy values already applied. The CLI and any other entry point go
//! through this one type.

use std::path::Path;

use chrono::NaiveDate;

use crate::boat::{Boat, BoatId, BoatSelection};
use crate::config::Config;
use crate::confirmation::{ConfirmationCodeSource, RandomCodeSource};
use crate::context::RequestContext;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::Result;
use crate::operations::{
    self, AvailabilityReport, AvailabilityRequest, BookingRules, Quote, RescheduleRequest,
    ReservationRequest,
};
use crate::reservation::{ConfirmationCode, Reservation};
use crate::slip::{Slip, SlipId};
use crate::stay::{Clock, LocalClock};

/// The booking service.
///
/// # Examples
///
/// ```no_run
/// use marina::{BoatSelection, Config, Marina, NewBoat, RequestContext};
///
/// let mut marina = Marina::open("/tmp/marina-data".as_ref(), Config::default()).unwrap();
/// let ctx = RequestContext::new(7.into());
/// let boat = BoatSelection::New(NewBoat::new("Sea Biscuit", 34, 50).unwrap());
///
/// let report = marina
///     .check_availability(&ctx, "2026-03-01", "2026-04-01", 40, &boat)
///     .unwrap();
/// if let Some(slip) = report.candidate_slips.first() {
///     let reservation = marina
///         .confirm_reservation(&ctx, "2026-03-01", "2026-04-01", slip.id, boat)
///         .unwrap();
///     println!("confirmed {} for {}", reservation.code(), reservation.total());
/// }
/// ```
pub struct Marina {
    db: Database,
    config: Config,
    rules: BookingRules,
    clock: Box<dyn Clock>,
    codes: Box<dyn ConfirmationCodeSource>,
}

impl std::fmt::Debug for Marina {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marina")
            .field("db", &self.db)
            .field("rules", &self.rules)
            .field("today", &self.clock.today())
            .finish_non_exhaustive()
    }
}

impl Marina {
    /// Wraps an open database. Uses the local clock and random codes with
    /// the configured prefix.
    #[must_use]
    pub fn new(db: Database, config: Config) -> Self {
        let rules = BookingRules::from_config(&config);
        let codes = RandomCodeSource::new(config.confirmation_prefix());
        Self {
            db,
            config,
            rules,
            clock: Box::new(LocalClock),
            codes: Box::new(codes),
        }
    }

    /// Opens `marina.db` in `data_dir` with the configured lock wait. The
    /// database is created unless `disable_autoinit` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or is missing
    /// while auto-initialization is disabled.
    pub fn open(data_dir: &Path, config: Config) -> Result<Self> {
        let mut db_config = DatabaseConfig::new(data_dir.join(DATABASE_FILE_NAME))
            .with_busy_timeout(config.lock_wait());
        if config.disable_autoinit.unwrap_or(false) {
            db_config = db_config.without_auto_create();
        }
        let db = Database::open(db_config)?;
        Ok(Self::new(db, config))
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the confirmation code source.
    #[must_use]
    pub fn with_code_source(mut self, codes: impl ConfirmationCodeSource + 'static) -> Self {
        self.codes = Box::new(codes);
        self
    }

    /// The date used for "no past stays" and completion.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The policy values derived from the configuration.
    #[must_use]
    pub const fn rules(&self) -> &BookingRules {
        &self.rules
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Lists slips that can take `boat` for the stay.
    ///
    /// # Errors
    ///
    /// See [`operations::check_availability`].
    pub fn check_availability(
        &self,
        ctx: &RequestContext,
        start: &str,
        end: &str,
        size_class: u32,
        boat: &BoatSelection,
    ) -> Result<AvailabilityReport> {
        let request = AvailabilityRequest::new(start, end, size_class, boat.clone());
        operations::check_availability(
            self.db.connection(),
            ctx,
            &self.rules,
            self.today(),
            &request,
        )
    }

    /// Books `slip_id` for the stay.
    ///
    /// # Errors
    ///
    /// See [`operations::confirm_reservation`].
    pub fn confirm_reservation(
        &mut self,
        ctx: &RequestContext,
        start: &str,
        end: &str,
        slip_id: SlipId,
        boat: BoatSelection,
    ) -> Result<Reservation> {
        let today = self.today();
        let request = ReservationRequest::new(start, end, slip_id, boat);
        operations::confirm_reservation(
            &mut self.db,
            ctx,
            &self.rules,
            today,
            self.codes.as_ref(),
            &request,
        )
    }

    /// Cancels one of the caller's confirmed reservations.
    ///
    /// # Errors
    ///
    /// See [`operations::cancel_reservation`].
    pub fn cancel_reservation(
        &mut self,
        ctx: &RequestContext,
        code: &ConfirmationCode,
    ) -> Result<Reservation> {
        operations::cancel_reservation(&mut self.db, ctx, code)
    }

    /// Moves one of the caller's confirmed reservations to new dates.
    ///
    /// # Errors
    ///
    /// See [`operations::reschedule_reservation`].
    pub fn reschedule_reservation(
        &mut self,
        ctx: &RequestContext,
        code: &ConfirmationCode,
        start: &str,
        end: &str,
    ) -> Result<Reservation> {
        let today = self.today();
        let request = RescheduleRequest::new(code.clone(), start, end);
        operations::reschedule_reservation(&mut self.db, ctx, &self.rules, today, &request)
    }

    /// Completes confirmed reservations that ended before today.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn complete_elapsed(&mut self) -> Result<usize> {
        let today = self.today();
        operations::complete_elapsed(&mut self.db, today)
    }

    /// Looks up one of the caller's reservations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) for an unknown
    /// or foreign code.
    pub fn find_reservation(
        &self,
        ctx: &RequestContext,
        code: &ConfirmationCode,
    ) -> Result<Reservation> {
        operations::find_reservation(self.db.connection(), ctx, code)
    }

    /// The caller's reservations, latest start first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_reservations(&self, ctx: &RequestContext) -> Result<Vec<Reservation>> {
        operations::list_reservations(self.db.connection(), ctx)
    }

    /// Registers a boat for the caller.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name or length.
    pub fn register_boat(&self, ctx: &RequestContext, name: &str, length_feet: u32) -> Result<Boat> {
        operations::register_boat(self.db.connection(), ctx, &self.rules, name, length_feet)
    }

    /// The caller's boats.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_boats(&self, ctx: &RequestContext) -> Result<Vec<Boat>> {
        operations::list_boats(self.db.connection(), ctx)
    }

    /// Removes one of the caller's boats.
    ///
    /// # Errors
    ///
    /// See [`operations::remove_boat`].
    pub fn remove_boat(&self, ctx: &RequestContext, id: BoatId) -> Result<()> {
        operations::remove_boat(self.db.connection(), ctx, id)
    }

    /// Adds a slip.
    ///
    /// # Errors
    ///
    /// See [`operations::add_slip`].
    pub fn add_slip(&self, size_feet: u32, location: &str) -> Result<Slip> {
        operations::add_slip(self.db.connection(), &self.rules, size_feet, location)
    }

    /// Puts a slip in or out of service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) for an unknown slip.
    pub fn set_slip_in_service(&self, id: SlipId, in_service: bool) -> Result<Slip> {
        operations::set_slip_in_service(self.db.connection(), id, in_service)
    }

    /// All slips, largest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_slips(&self) -> Result<Vec<Slip>> {
        operations::list_slips(self.db.connection())
    }

    /// Adds the configured seed slips that are missing.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid seed.
    pub fn seed_slips(&self) -> Result<Vec<Slip>> {
        let seeds = self.config.slips.clone().unwrap_or_default();
        operations::seed_slips(self.db.connection(), &self.rules, &seeds)
    }

    /// Prices a stay without choosing a slip.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad dates or length.
    pub fn quote(&self, length_feet: u32, start: &str, end: &str) -> Result<Quote> {
        operations::quote(&self.rules, self.today(), length_feet, start, end)
    }
}
