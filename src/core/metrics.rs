//! Sink metrics for observability
//!
//! Counters describing what the shared sink did with the bytes it was handed.
//! Write and flush failures are never escalated to logging call sites, so these
//! counters are the place to notice them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for sink observability
///
/// # Example
///
/// ```
/// use rust_structured_logger::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
/// metrics.record_written(42);
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.bytes_written(), 42);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Records handed to the destination (or its buffer)
    records_written: AtomicU64,

    /// Bytes handed to the destination (or its buffer)
    bytes_written: AtomicU64,

    /// Records lost because the write failed
    write_failures: AtomicU64,

    /// Successful flushes, explicit or from the background flusher
    flushes: AtomicU64,

    /// Failed flushes
    flush_failures: AtomicU64,
}

impl SinkMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self, bytes: usize) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Returns the previous failure count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the previous failure count
    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of records lost to write failures
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures();
        let total = self.records_written() + failed;
        if total == 0 {
            0.0
        } else {
            (failed as f64 / total as f64) * 100.0
        }
    }
}
