//! Rate-limited error logging
//!
//! A drain pass that hits a dead disk would otherwise emit one error per
//! record. The throttle emits at most one log line per interval and
//! reports how many errors were suppressed in between.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default minimum interval between emitted error lines
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_secs(10);

/// Error logger that emits at most once per interval
pub struct ErrorThrottle {
    min_interval: Duration,
    last_emit: Mutex<Option<Instant>>,
    since_last_emit: AtomicU64,
    total: AtomicU64,
}

impl ErrorThrottle {
    /// Create a throttle with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_emit: Mutex::new(None),
            since_last_emit: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }

    /// Record an error, logging it if the interval has elapsed
    ///
    /// Returns true if the error was logged, false if it was suppressed.
    pub fn error(&self, context: &str, error: &dyn std::fmt::Display) -> bool {
        self.since_last_emit.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);

        let should_emit = {
            let mut last = self.last_emit.lock();
            let now = Instant::now();
            match *last {
                Some(at) if now.duration_since(at) < self.min_interval => false,
                _ => {
                    *last = Some(now);
                    true
                }
            }
        };

        if should_emit {
            let batch = self.since_last_emit.swap(0, Ordering::Relaxed);
            let total = self.total.load(Ordering::Relaxed);
            if batch > 1 {
                tracing::error!(
                    context = %context,
                    error = %error,
                    suppressed = batch - 1,
                    total_errors = total,
                    "persistence error (rate-limited)"
                );
            } else {
                tracing::error!(
                    context = %context,
                    error = %error,
                    total_errors = total,
                    "persistence error"
                );
            }
        }
        should_emit
    }

    /// Total errors ever recorded
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

impl Default for ErrorThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_first_error_is_logged() {
        let throttle = ErrorThrottle::default();
        let error = io::Error::new(io::ErrorKind::Other, "boom");
        assert!(throttle.error("write", &error));
        assert_eq!(throttle.total(), 1);
    }

    #[test]
    fn test_rapid_errors_are_suppressed_but_counted() {
        let throttle = ErrorThrottle::new(Duration::from_secs(60));
        let error = io::Error::new(io::ErrorKind::Other, "boom");

        assert!(throttle.error("write", &error));
        for _ in 0..20 {
            assert!(!throttle.error("write", &error));
        }
        assert_eq!(throttle.total(), 21);
    }

    #[test]
    fn test_zero_interval_always_logs() {
        let throttle = ErrorThrottle::new(Duration::ZERO);
        let error = io::Error::new(io::ErrorKind::Other, "boom");
        assert!(throttle.error("write", &error));
        assert!(throttle.error("write", &error));
    }
}
