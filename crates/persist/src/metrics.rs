//! Persistence pipeline metrics
//!
//! Cheap atomic counters bumped on the drain path, with a point-in-time
//! snapshot for logging and tests. There is no exporter; the daemon logs
//! the snapshot at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the persistence pipeline
#[derive(Debug, Default)]
pub struct PersistMetrics {
    /// Total flush() calls
    pub flush_requests: AtomicU64,

    /// Flush requests folded into an already-running pass
    pub flushes_coalesced: AtomicU64,

    /// Drain passes executed
    pub drain_passes: AtomicU64,

    /// Records successfully written
    pub records_written: AtomicU64,

    /// Bytes appended to spool files (separators included)
    pub bytes_written: AtomicU64,

    /// Records skipped because the writer could not be resolved
    pub resolve_errors: AtomicU64,

    /// Records skipped because payload serialization failed
    pub serialize_errors: AtomicU64,

    /// Records skipped because the filesystem write failed
    pub write_errors: AtomicU64,
}

impl PersistMetrics {
    /// Create a zeroed metrics instance
    pub const fn new() -> Self {
        Self {
            flush_requests: AtomicU64::new(0),
            flushes_coalesced: AtomicU64::new(0),
            drain_passes: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            resolve_errors: AtomicU64::new(0),
            serialize_errors: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    /// Record a flush request
    #[inline]
    pub fn record_flush_request(&self) {
        self.flush_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a flush request that coalesced into a running pass
    #[inline]
    pub fn record_flush_coalesced(&self) {
        self.flushes_coalesced.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the start of a drain pass
    #[inline]
    pub fn record_drain_pass(&self) {
        self.drain_passes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successfully written record
    #[inline]
    pub fn record_written(&self, bytes: u64) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a skipped record: writer resolution failed
    #[inline]
    pub fn record_resolve_error(&self) {
        self.resolve_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped record: serialization failed
    #[inline]
    pub fn record_serialize_error(&self) {
        self.serialize_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped record: write failed
    #[inline]
    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            flush_requests: self.flush_requests.load(Ordering::Relaxed),
            flushes_coalesced: self.flushes_coalesced.load(Ordering::Relaxed),
            drain_passes: self.drain_passes.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            resolve_errors: self.resolve_errors.load(Ordering::Relaxed),
            serialize_errors: self.serialize_errors.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of the pipeline counters
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub flush_requests: u64,
    pub flushes_coalesced: u64,
    pub drain_passes: u64,
    pub records_written: u64,
    pub bytes_written: u64,
    pub resolve_errors: u64,
    pub serialize_errors: u64,
    pub write_errors: u64,
}

impl MetricsSnapshot {
    /// Records skipped for any reason
    pub fn records_skipped(&self) -> u64 {
        self.resolve_errors + self.serialize_errors + self.write_errors
    }
}
