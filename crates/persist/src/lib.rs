//! Spool - Persistence pipeline
//!
//! Drains an in-memory work queue of heterogeneous records into
//! per-category append-only files with size-based rotation.
//!
//! # Architecture
//!
//! ```text
//! [producers] --enqueue--> [WorkQueue]
//!                              |
//! flush() -> [DrainCoordinator] -> [drain pass] -> [WriterRegistry]
//!             (one pass at a time,       |              |
//!              requests coalesce)     dequeue      [RotatingFileWriter]
//!                                    until empty        -> disk
//! ```
//!
//! The coordinator is the single serialization point for disk writes:
//! at most one drain pass runs at a time, flush requests arriving
//! mid-pass coalesce into exactly one follow-up, and producers never
//! block. Within a pass, records for a category hit that category's file
//! in dequeue order.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spool_persist::{
//!     CategoryDirs, MemoryQueue, PersistService, Record, RegistryConfig, WriterRegistry,
//! };
//!
//! let queue = Arc::new(MemoryQueue::new());
//! let registry = WriterRegistry::new(
//!     RegistryConfig::default(),
//!     Arc::new(CategoryDirs::new("spool/")),
//! );
//! let service = PersistService::new(queue.clone(), registry);
//!
//! queue.enqueue(Record::text("orders", "order 4711 accepted"));
//! service.flush(); // fire-and-forget; safe to call arbitrarily often
//! ```

/// Drain coordination: single active pass, request coalescing
pub mod coordinator;

/// Directory resolution seam
pub mod dirs;

/// Error types
pub mod error;

/// Pipeline counters
pub mod metrics;

/// Work queue seam and the in-memory default
pub mod queue;

/// Record model and category normalization
pub mod record;

/// Category -> writer map
pub mod registry;

/// Drain pass orchestration
pub mod service;

/// Rate-limited error logging
pub mod throttle;

/// Rotating append-only file writer
pub mod writer;

pub use coordinator::DrainCoordinator;
pub use dirs::{CategoryDirs, DirectoryResolver};
pub use error::{PersistError, Result};
pub use metrics::{MetricsSnapshot, PersistMetrics};
pub use queue::{MemoryQueue, WorkQueue};
pub use record::{normalize_category, Payload, Record};
pub use registry::{RegistryConfig, WriterRegistry};
pub use service::PersistService;
pub use throttle::{ErrorThrottle, DEFAULT_THROTTLE_INTERVAL};
pub use writer::{RotatingFileWriter, WriterConfig};
