//! Spool Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use spool_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[persist]\nnode_id = \"ingest-01\"").unwrap();
//! assert_eq!(config.persist.node_id, "ingest-01");
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [persist]
//! base_path = "spool/"
//!
//! [log]
//! level = "info"
//! ```

mod error;
mod logging;
mod persist;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use persist::{PersistConfig, DEFAULT_MAX_FILE_SIZE};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persistence pipeline settings
    pub persist: PersistConfig,

    /// Logging settings
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        contents.parse()
    }

    /// Validate the configuration
    ///
    /// Checks that values the persistence layer depends on are usable:
    /// the node id must be a filename-safe token and the rotation
    /// threshold must be nonzero.
    pub fn validate(&self) -> Result<()> {
        if self.persist.node_id.is_empty() {
            return Err(ConfigError::invalid_value(
                "persist",
                "node_id",
                "must not be empty",
            ));
        }
        if !self
            .persist
            .node_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::invalid_value(
                "persist",
                "node_id",
                format!(
                    "'{}' contains characters outside [a-zA-Z0-9_-]",
                    self.persist.node_id
                ),
            ));
        }
        if self.persist.max_file_size == 0 {
            return Err(ConfigError::invalid_value(
                "persist",
                "max_file_size",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
