//! Bounded metric history and rolling provider statistics
//!
//! The store keeps per-operation outcome snapshots in a fixed-capacity buffer
//! with FIFO eviction, and computes per-provider rolling statistics on demand.
//! Statistics are derived values; nothing here outlives the buffer it was
//! computed from.

use super::bounded::BoundedPush;
use super::types::{HealthCheckResult, MetricRecord, MetricSnapshot, ProviderStats};
use chrono::{Duration as ChronoDuration, Utc};
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

/// Trailing window used for throughput, in seconds
const THROUGHPUT_WINDOW_SECS: i64 = 300;

/// Bounded, append-only store of operation outcomes
///
/// Cheap to clone; clones share the same underlying buffer.
#[derive(Debug, Clone)]
pub struct MetricStore {
    inner: Arc<RwLock<MetricStorage>>,
}

#[derive(Debug)]
struct MetricStorage {
    snapshots: VecDeque<MetricSnapshot>,
    capacity: usize,
}

impl MetricStore {
    /// Create a store retaining at most `capacity` snapshots
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricStorage {
                snapshots: VecDeque::with_capacity(capacity.min(1024)),
                capacity,
            })),
        }
    }

    /// Stamp and append a record, evicting the oldest entries past capacity
    ///
    /// Returns the stored snapshot so callers can evaluate thresholds on it.
    pub fn record(&self, record: MetricRecord) -> MetricSnapshot {
        let snapshot = MetricSnapshot::stamp(record, Utc::now());
        let mut storage = self.inner.write();
        let capacity = storage.capacity;
        storage.snapshots.push_bounded(snapshot.clone(), capacity);
        snapshot
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.inner.read().snapshots.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().snapshots.is_empty()
    }

    /// Current capacity
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity
    }

    /// Change the capacity, trimming the oldest entries when shrinking
    pub fn set_capacity(&self, capacity: usize) {
        let mut storage = self.inner.write();
        storage.capacity = capacity;
        storage.snapshots.trim_to(capacity);
    }

    /// All retained snapshots, oldest first
    pub fn snapshots(&self) -> Vec<MetricSnapshot> {
        self.inner.read().snapshots.iter().cloned().collect()
    }

    /// Retained snapshots for one provider, oldest first
    pub fn snapshots_for(&self, provider: &str) -> Vec<MetricSnapshot> {
        self.inner
            .read()
            .snapshots
            .iter()
            .filter(|s| s.provider == provider)
            .cloned()
            .collect()
    }

    /// The most recent `count` snapshots for one provider, oldest first
    pub fn recent_for(&self, provider: &str, count: usize) -> Vec<MetricSnapshot> {
        let storage = self.inner.read();
        let mut recent: Vec<MetricSnapshot> = storage
            .snapshots
            .iter()
            .rev()
            .filter(|s| s.provider == provider)
            .take(count)
            .cloned()
            .collect();
        recent.reverse();
        recent
    }

    /// Rolling statistics for one provider
    ///
    /// `connectivity` is the latest connectivity check for the provider;
    /// availability is taken from it rather than derived from metrics.
    pub fn stats(&self, provider: &str, connectivity: Option<&HealthCheckResult>) -> ProviderStats {
        let storage = self.inner.read();
        let snapshots: Vec<&MetricSnapshot> = storage
            .snapshots
            .iter()
            .filter(|s| s.provider == provider)
            .collect();

        let total = snapshots.len() as u64;
        let successes: Vec<&&MetricSnapshot> =
            snapshots.iter().filter(|s| s.success).collect();

        let avg_latency_ms = if successes.is_empty() {
            0.0
        } else {
            successes.iter().map(|s| s.duration_ms as f64).sum::<f64>() / successes.len() as f64
        };

        let success_rate = if total == 0 {
            0.0
        } else {
            successes.len() as f64 / total as f64
        };

        let window_start = Utc::now() - ChronoDuration::seconds(THROUGHPUT_WINDOW_SECS);
        let windowed = snapshots
            .iter()
            .filter(|s| s.timestamp >= window_start)
            .count();
        let throughput = windowed as f64 / THROUGHPUT_WINDOW_SECS as f64;

        let availability = match connectivity {
            Some(result) if result.available => 1.0,
            _ => 0.0,
        };

        let last_failure = snapshots
            .iter()
            .rev()
            .find(|s| !s.success)
            .map(|s| s.timestamp);

        ProviderStats {
            avg_latency_ms,
            success_rate,
            total_requests: total,
            throughput,
            availability,
            last_failure,
        }
    }
}
