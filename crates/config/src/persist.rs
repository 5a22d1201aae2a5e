//! Persistence pipeline configuration
//!
//! Controls the writer registry and rotation behavior: where files land,
//! how large a file may grow before rotation, and how the node tags its
//! output files.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default rotation threshold (16MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Persistence configuration
///
/// # Example
///
/// ```toml
/// [persist]
/// node_id = "ingest-01"
/// base_path = "spool/"
/// max_file_size = 16777216
/// lazy = true
/// flush_interval_ms = 1000
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    /// Tag embedded in output filenames so multiple writer processes can
    /// share a directory without colliding.
    /// Default: "node0"
    pub node_id: String,

    /// Defer opening each category's file until the first actual write.
    /// Default: true
    pub lazy: bool,

    /// Rotation threshold in bytes. A write that would push the current
    /// file past this size rotates to a new file first.
    /// Default: 16MB
    pub max_file_size: u64,

    /// Base directory; each category gets a subdirectory underneath.
    /// Default: "spool"
    pub base_path: PathBuf,

    /// Interval between periodic flush triggers in the daemon.
    /// Default: 1000ms
    pub flush_interval_ms: u64,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            node_id: "node0".into(),
            lazy: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            base_path: PathBuf::from("spool"),
            flush_interval_ms: 1000,
        }
    }
}

impl PersistConfig {
    /// Flush interval as a `Duration`
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PersistConfig::default();
        assert_eq!(config.node_id, "node0");
        assert!(config.lazy);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.base_path, PathBuf::from("spool"));
        assert_eq!(config.flush_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_deserialize_empty() {
        let config: PersistConfig = toml::from_str("").unwrap();
        assert_eq!(config.node_id, "node0");
        assert!(config.lazy);
    }

    #[test]
    fn test_deserialize_partial() {
        let toml = r#"
node_id = "ingest-02"
max_file_size = 1024
"#;
        let config: PersistConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.node_id, "ingest-02");
        assert_eq!(config.max_file_size, 1024);
        // untouched fields keep defaults
        assert!(config.lazy);
        assert_eq!(config.flush_interval_ms, 1000);
    }
}
