//! Codec Metrics
//!
//! Process-wide counters for frames moving through the codec.
//!
//! Uses atomic counters so any number of streams can record without locking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Global metrics collector for codec operations
#[derive(Debug)]
pub struct Metrics {
    /// Frames written to a transport
    pub frames_written: AtomicU64,
    /// Frames decoded into a target object
    pub frames_read: AtomicU64,
    /// Wire bytes written, including prefix and varint
    pub bytes_written: AtomicU64,
    /// Decompressed payload bytes delivered to decode routines
    pub payload_bytes_read: AtomicU64,
    /// List items decoded by either list decoder
    pub list_items_decoded: AtomicU64,
    /// Declared lengths rejected against an expected size
    pub length_mismatches: AtomicU64,
    /// Decode attempts that failed for any other reason
    pub decode_errors: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            frames_written: AtomicU64::new(0),
            frames_read: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            payload_bytes_read: AtomicU64::new(0),
            list_items_decoded: AtomicU64::new(0),
            length_mismatches: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a frame handed to the transport
    pub fn frame_written(&self, wire_bytes: u64) {
        self.frames_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(wire_bytes, Ordering::Relaxed);
    }

    /// Record a frame decoded into its target
    pub fn frame_read(&self, payload_bytes: u64) {
        self.frames_read.fetch_add(1, Ordering::Relaxed);
        self.payload_bytes_read.fetch_add(payload_bytes, Ordering::Relaxed);
    }

    /// Record one decoded list item
    pub fn list_item_decoded(&self, payload_bytes: u64) {
        self.list_items_decoded.fetch_add(1, Ordering::Relaxed);
        self.payload_bytes_read.fetch_add(payload_bytes, Ordering::Relaxed);
    }

    /// Record a declared length that disagreed with the expected size
    pub fn length_mismatch(&self) {
        self.length_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed decode
    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_written: self.frames_written.load(Ordering::Relaxed),
            frames_read: self.frames_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            payload_bytes_read: self.payload_bytes_read.load(Ordering::Relaxed),
            list_items_decoded: self.list_items_decoded.load(Ordering::Relaxed),
            length_mismatches: self.length_mismatches.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            frames_written = snapshot.frames_written,
            frames_read = snapshot.frames_read,
            bytes_written = snapshot.bytes_written,
            payload_bytes_read = snapshot.payload_bytes_read,
            list_items_decoded = snapshot.list_items_decoded,
            length_mismatches = snapshot.length_mismatches,
            decode_errors = snapshot.decode_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub frames_written: u64,
    pub frames_read: u64,
    pub bytes_written: u64,
    pub payload_bytes_read: u64,
    pub list_items_decoded: u64,
    pub length_mismatches: u64,
    pub decode_errors: u64,
    pub uptime_seconds: u64,
}

static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}
