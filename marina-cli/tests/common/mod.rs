//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own temporary data directory, a pinned date and a
//! working directory with no project configuration above it.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Date every command runs as.
pub const TODAY: &str = "2026-01-15";

/// Slips written to the user configuration by [`TestEnv::init_standard`].
pub const STANDARD_SLIPS: &str = "slips:
  - { size: 26, location: A-1 }
  - { size: 40, location: B-1 }
  - { size: 40, location: B-2 }
  - { size: 50, location: C-1 }
";

/// Environment variables that would leak the developer's setup into tests.
const MARINA_VARS: [&str; 14] = [
    "MARINA_DATA_DIR",
    "MARINA_USER",
    "MARINA_TODAY",
    "MARINA_BUSY_TIMEOUT",
    "MARINA_DISABLE_AUTOINIT",
    "MARINA_LOG_MODE",
    "MARINA_OUTPUT_FORMAT",
    "MARINA_PRICE_PER_FOOT_CENTS",
    "MARINA_HOOKUP_FEE_CENTS",
    "MARINA_MINIMUM_STAY_DAYS",
    "MARINA_MAX_BOAT_LENGTH_FEET",
    "MARINA_SIZE_CLASSES",
    "MARINA_CONFIRMATION_PREFIX",
    "MARINA_MAXIMUM_LOCK_WAIT_SECONDS",
];

/// Test environment with an isolated data directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory (also the working directory).
    pub temp_path: PathBuf,
    /// Path to the marina data directory (not created until used).
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("marina-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The binary with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("marina").expect("Failed to find marina binary");
        for var in MARINA_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// The binary pointed at this environment's data directory and date.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--today")
            .arg(TODAY);
        cmd
    }

    /// [`TestEnv::command`] acting as `user`.
    pub fn as_user(&self, user: i64) -> Command {
        let mut cmd = self.command();
        cmd.arg("--user").arg(user.to_string());
        cmd
    }

    /// Writes `contents` to the user configuration file.
    pub fn write_user_config(&self, contents: &str) {
        fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        fs::write(self.data_dir.join("config.yaml"), contents).expect("Failed to write config");
    }

    /// Initializes the database with A-1 (26 ft), B-1 and B-2 (40 ft) and
    /// C-1 (50 ft).
    pub fn init_standard(&self) {
        self.write_user_config(STANDARD_SLIPS);
        self.command().arg("init").assert().success();
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("marina.db")
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Looks up a slip id by location through `slip list --format json`.
    pub fn slip_id(&self, location: &str) -> i64 {
        let output = self
            .command()
            .args(["slip", "list", "--format", "json"])
            .output()
            .expect("Failed to run slip list");
        assert!(output.status.success(), "slip list failed");

        let slips: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("slip list is not JSON");
        slips
            .as_array()
            .expect("slip list is not an array")
            .iter()
            .find(|slip| slip["location"] == location)
            .and_then(|slip| slip["id"].as_i64())
            .unwrap_or_else(|| panic!("no slip at {location}"))
    }

    /// Books `slip` for `user` with an inline boat and returns the code.
    ///
    /// # Panics
    /// Panics if the booking fails.
    pub fn reserve_inline(&self, user: i64, slip: i64, length: u32, start: &str, end: &str) -> String {
        let output = self
            .as_user(user)
            .arg("reserve")
            .arg("--slip")
            .arg(slip.to_string())
            .args(["--start", start, "--end", end])
            .args(["--new-boat-name", "Test Boat"])
            .arg("--new-boat-length")
            .arg(length.to_string())
            .output()
            .expect("Failed to run reserve");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
