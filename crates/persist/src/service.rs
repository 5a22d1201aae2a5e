//! Persistence service
//!
//! Orchestrates a drain pass: repeatedly pulls the next queued record,
//! resolves its writer through the registry, encodes structured payloads,
//! and appends them - until the queue reports empty, then releases the
//! coordinator.
//!
//! `flush()` is the only trigger surface: fire-and-forget, no result,
//! safe to call arbitrarily often. The coordinator guarantees a single
//! pass at a time and folds redundant requests into one follow-up pass,
//! so producers never block and never need to poll.
//!
//! Per-record failures (unresolvable writer, serialization, filesystem
//! write) are logged and skipped; one bad record cannot stall its
//! category or the pass. A pass that panics still releases the running
//! slot.

use std::sync::Arc;

use crate::coordinator::DrainCoordinator;
use crate::error::PersistError;
use crate::metrics::{MetricsSnapshot, PersistMetrics};
use crate::queue::WorkQueue;
use crate::registry::WriterRegistry;
use crate::throttle::ErrorThrottle;

/// Drains the work queue into per-category rotating files
///
/// Cheap to clone; clones share the queue, registry, and coordinator.
#[derive(Clone)]
pub struct PersistService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    queue: Arc<dyn WorkQueue>,
    registry: WriterRegistry,
    coordinator: DrainCoordinator,
    metrics: PersistMetrics,
    errors: ErrorThrottle,
}

impl PersistService {
    /// Create a service draining `queue` into `registry`'s writers
    pub fn new(queue: Arc<dyn WorkQueue>, registry: WriterRegistry) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                queue,
                registry,
                coordinator: DrainCoordinator::new(),
                metrics: PersistMetrics::new(),
                errors: ErrorThrottle::default(),
            }),
        }
    }

    /// Request a drain pass
    ///
    /// Returns immediately. If a pass is already running the request
    /// coalesces into at most one follow-up pass. Must be called from
    /// within a Tokio runtime.
    pub fn flush(&self) {
        self.inner.metrics.record_flush_request();
        if !self.inner.coordinator.try_begin() {
            self.inner.metrics.record_flush_coalesced();
            return;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            loop {
                let pass = Arc::clone(&inner);
                if let Err(error) = tokio::task::spawn_blocking(move || pass.drain_pass()).await {
                    // A panicked pass must still release the running slot.
                    tracing::error!(%error, "drain pass aborted");
                }
                if !inner.coordinator.finish() {
                    break;
                }
            }
        });
    }

    /// Whether no drain pass is currently running
    pub fn is_idle(&self) -> bool {
        self.inner.coordinator.is_idle()
    }

    /// Wait until all running and pending passes have completed
    pub async fn wait_idle(&self) {
        self.inner.coordinator.wait_idle().await;
    }

    /// Pipeline counters
    pub fn metrics(&self) -> &PersistMetrics {
        &self.inner.metrics
    }

    /// The writer registry backing this service
    pub fn registry(&self) -> &WriterRegistry {
        &self.inner.registry
    }

    /// Drain whatever is queued, then close every writer
    pub async fn shutdown(&self) -> MetricsSnapshot {
        self.flush();
        self.wait_idle().await;
        self.inner.registry.close_all();

        let snapshot = self.inner.metrics.snapshot();
        tracing::info!(
            records = snapshot.records_written,
            bytes = snapshot.bytes_written,
            skipped = snapshot.records_skipped(),
            passes = snapshot.drain_passes,
            "persistence service stopped"
        );
        snapshot
    }
}

impl ServiceInner {
    /// One drain pass: dequeue until empty, then flush the writers
    fn drain_pass(&self) {
        self.metrics.record_drain_pass();

        while let Some(record) = self.queue.dequeue() {
            let writer = match self.registry.resolve(record.category()) {
                Ok(writer) => writer,
                Err(error) => {
                    self.metrics.record_resolve_error();
                    self.errors.error("writer resolution failed", &error);
                    continue;
                }
            };

            let line = match record.payload().to_line() {
                Ok(line) => line,
                Err(error) => {
                    self.metrics.record_serialize_error();
                    self.errors
                        .error("payload serialization failed", &PersistError::Serialize(error));
                    continue;
                }
            };

            match writer.lock().write(&line) {
                Ok(bytes) => self.metrics.record_written(bytes),
                Err(error) => {
                    self.metrics.record_write_error();
                    self.errors
                        .error("record write failed", &PersistError::Write(error));
                }
            };
        }

        self.registry.flush_all();
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
