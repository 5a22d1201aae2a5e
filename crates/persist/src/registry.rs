//! Writer registry
//!
//! Maps normalized category keys to their long-lived writers. Writers are
//! created on first use and never evicted; duplicate writers for one
//! category would split a logical stream across two file handles, so
//! creation for a new key happens inside the map's entry critical
//! section.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::dirs::DirectoryResolver;
use crate::error::{PersistError, Result};
use crate::record::normalize_category;
use crate::writer::{RotatingFileWriter, WriterConfig};

/// Writer construction settings shared by all categories
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Node tag embedded in output filenames
    pub node_id: String,

    /// Defer file open until first write
    pub lazy: bool,

    /// Rotation threshold in bytes
    pub max_file_size: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            node_id: "node0".into(),
            lazy: true,
            max_file_size: 16 * 1024 * 1024,
        }
    }
}

/// Lazily-populated category -> writer map
pub struct WriterRegistry {
    writers: DashMap<String, Arc<Mutex<RotatingFileWriter>>>,
    resolver: Arc<dyn DirectoryResolver>,
    config: RegistryConfig,
}

impl WriterRegistry {
    /// Create an empty registry
    pub fn new(config: RegistryConfig, resolver: Arc<dyn DirectoryResolver>) -> Self {
        Self {
            writers: DashMap::new(),
            resolver,
            config,
        }
    }

    /// Writer for a raw category key, creating it on first use
    ///
    /// The key is normalized first, so raw indices that normalize
    /// identically resolve to the same writer instance. Directory
    /// resolution and writer construction failures surface to the caller;
    /// nothing is inserted in that case, so a later record retries.
    pub fn resolve(&self, raw_category: &str) -> Result<Arc<Mutex<RotatingFileWriter>>> {
        let key = normalize_category(raw_category);

        // Fast path: writer exists
        if let Some(writer) = self.writers.get(&key) {
            return Ok(Arc::clone(&writer));
        }

        // Slow path: the vacant entry holds the shard lock, so two racing
        // resolutions of the same new key cannot both construct a writer.
        match self.writers.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let key = entry.key().clone();
                let dir = self
                    .resolver
                    .resolve(&key)
                    .map_err(|source| PersistError::DirResolve {
                        category: key.clone(),
                        source,
                    })?;
                let writer = RotatingFileWriter::open(WriterConfig {
                    category: key.clone(),
                    node_id: self.config.node_id.clone(),
                    dir,
                    max_file_size: self.config.max_file_size,
                    lazy: self.config.lazy,
                })
                .map_err(|source| PersistError::WriterInit {
                    category: key.clone(),
                    source,
                })?;

                tracing::debug!(category = %key, "created writer");
                let writer = Arc::new(Mutex::new(writer));
                entry.insert(Arc::clone(&writer));
                Ok(writer)
            }
        }
    }

    /// Flush every writer, logging failures
    ///
    /// Called at the end of each drain pass so queued bytes reach the OS
    /// even when the next pass is far away.
    pub fn flush_all(&self) {
        for entry in self.writers.iter() {
            if let Err(error) = entry.value().lock().flush() {
                tracing::warn!(category = %entry.key(), %error, "writer flush failed");
            }
        }
    }

    /// Shutdown path: flush and drop every file handle
    pub fn close_all(&self) {
        for entry in self.writers.iter() {
            if let Err(error) = entry.value().lock().close() {
                tracing::warn!(category = %entry.key(), %error, "writer close failed");
            }
        }
        tracing::debug!(writers = self.writers.len(), "registry closed");
    }

    /// Number of categories with a writer
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// Check whether any writer exists yet
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
