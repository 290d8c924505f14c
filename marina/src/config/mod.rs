//! Configuration system for marina.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `marina.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every merged value
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`MARINA_*`)
//! 3. Private project config (`marina.local.yaml`)
//! 4. Project config (`marina.yaml`)
//! 5. User config (`~/.marina/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use marina::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/harbor"))
//!     .build()
//!     .unwrap();
//!
//! println!("Slip sizes: {:?}", config.size_classes());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    Config, ConfirmationConfig, OutputFormat, PolicyConfig, PricingConfig, SlipSeed,
    DEFAULT_SIZE_CLASSES,
};
pub use validator::ConfigValidator;
