//! Work queue seam
//!
//! The persistence pipeline does not own record production; it drains
//! whatever queue the host hands it. The contract is non-blocking:
//! `dequeue` returns the next record or `None` when the queue is empty,
//! it never waits for producers.

use crossbeam::queue::SegQueue;

use crate::record::Record;

/// Non-blocking source of records for drain passes
///
/// Implementations must be thread-safe; the drain loop calls `dequeue`
/// from a blocking-pool thread while producers keep enqueueing.
pub trait WorkQueue: Send + Sync + 'static {
    /// Next record, or `None` when the queue is currently empty
    fn dequeue(&self) -> Option<Record>;
}

/// Unbounded in-process queue on a lock-free MPMC list
///
/// The default producer-side collaborator: sources push records with
/// `enqueue`, the drain pass pops them in FIFO order.
#[derive(Default)]
pub struct MemoryQueue {
    inner: SegQueue<Record>,
}

impl MemoryQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a record for the next drain pass
    pub fn enqueue(&self, record: Record) {
        self.inner.push(record);
    }

    /// Number of records currently queued
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl WorkQueue for MemoryQueue {
    fn dequeue(&self) -> Option<Record> {
        self.inner.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_returns_none() {
        let queue = MemoryQueue::new();
        assert!(queue.is_empty());
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_fifo_order() {
        let queue = MemoryQueue::new();
        queue.enqueue(Record::text("a", "first"));
        queue.enqueue(Record::text("a", "second"));
        queue.enqueue(Record::text("b", "third"));
        assert_eq!(queue.len(), 3);

        let lines: Vec<String> = std::iter::from_fn(|| queue.dequeue())
            .map(|r| r.payload().to_line().unwrap().into_owned())
            .collect();
        assert_eq!(lines, ["first", "second", "third"]);
        assert!(queue.dequeue().is_none());
    }
}
