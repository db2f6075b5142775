//! Logger metrics for observability
//!
//! Counters for monitoring dispatch health: events that reached the writers,
//! events suppressed by the threshold, and individual writer failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters for one logger
///
/// # Example
///
/// ```
/// use hierarchical_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.events_suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Events that passed the threshold and were handed to the writers
    events_dispatched: AtomicU64,

    /// Calls rejected by the threshold (no event was built)
    events_suppressed: AtomicU64,

    /// Writer calls that returned an error or panicked
    writer_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            events_suppressed: AtomicU64::new(0),
            writer_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_suppressed(&self) -> u64 {
        self.events_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writer_failures(&self) -> u64 {
        self.writer_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.events_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_writer_failure(&self) -> u64 {
        self.writer_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Writer failures per dispatched event, as a percentage
    ///
    /// Returns 0.0 if nothing has been dispatched. With several writers per
    /// logger the value can exceed 100.
    pub fn failure_rate(&self) -> f64 {
        let dispatched = self.events_dispatched() as f64;
        if dispatched == 0.0 {
            0.0
        } else {
            (self.writer_failures() as f64 / dispatched) * 100.0
        }
    }

    pub fn reset(&self) {
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.events_suppressed.store(0, Ordering::Relaxed);
        self.writer_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            events_dispatched: AtomicU64::new(self.events_dispatched()),
            events_suppressed: AtomicU64::new(self.events_suppressed()),
            writer_failures: AtomicU64::new(self.writer_failures()),
        }
    }
}
