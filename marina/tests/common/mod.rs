//! Common test utilities for marina integration tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use marina::{Config, FixedClock, Marina, RequestContext, Slip};

/// The date every fixture treats as today.
pub const TODAY: &str = "2026-01-15";

/// Parses a `YYYY-MM-DD` literal.
#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A marina in a temporary data directory with the clock pinned to
/// [`TODAY`]. The directory lives as long as the fixture.
#[allow(dead_code)]
pub struct MarinaFixture {
    pub dir: TempDir,
    pub marina: Marina,
}

impl MarinaFixture {
    /// Opens a fresh marina with default configuration.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Opens a fresh marina with `config`.
    #[allow(dead_code)]
    pub fn with_config(config: Config) -> Self {
        let dir = TempDir::new().unwrap();
        let marina = open(dir.path(), config);
        Self { dir, marina }
    }

    /// Adds the standard slips: one 26 ft, two 40 ft, one 50 ft.
    #[allow(dead_code)]
    pub fn with_standard_slips(self) -> Self {
        for (size, location) in [(26, "A-1"), (40, "B-1"), (40, "B-2"), (50, "C-1")] {
            self.marina.add_slip(size, location).unwrap();
        }
        self
    }

    /// Data directory of this fixture.
    #[allow(dead_code)]
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// The slip at `location`.
    #[allow(dead_code)]
    pub fn slip(&self, location: &str) -> Slip {
        self.marina
            .list_slips()
            .unwrap()
            .into_iter()
            .find(|slip| slip.location == location)
            .unwrap()
    }
}

/// Opens another connection to the marina in `data_dir`.
#[allow(dead_code)]
pub fn open(data_dir: &Path, config: Config) -> Marina {
    Marina::open(data_dir, config)
        .unwrap()
        .with_clock(FixedClock(date(TODAY)))
}

/// Context for user `id`.
#[allow(dead_code)]
pub fn user(id: i64) -> RequestContext {
    RequestContext::new(id.into())
}
