//! Bounded alert history
//!
//! Alerts are appended with FIFO eviction past capacity, logged at the level
//! matching their severity, and retained for querying. Entries are immutable
//! after append except for the `resolved` flag.

use super::bounded::BoundedPush;
use super::types::{AlertSeverity, HealthAlert};
use crate::utils::error::{MonitorError, Result};
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Bounded history of severity-tagged alerts
///
/// Cheap to clone; clones share the same underlying history.
#[derive(Debug, Clone)]
pub struct AlertManager {
    inner: Arc<RwLock<AlertStorage>>,
}

#[derive(Debug)]
struct AlertStorage {
    history: VecDeque<HealthAlert>,
    capacity: usize,
}

impl AlertManager {
    /// Create a manager retaining at most `capacity` alerts
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AlertStorage {
                history: VecDeque::new(),
                capacity,
            })),
        }
    }

    /// Raise an alert, logging it and appending it to the history
    pub fn raise(
        &self,
        severity: AlertSeverity,
        message: impl Into<String>,
        provider: Option<String>,
    ) -> HealthAlert {
        let alert = HealthAlert::new(severity, message, provider);

        match alert.severity {
            AlertSeverity::Info => {
                info!(provider = ?alert.provider, "{}: {}", alert.severity, alert.message)
            }
            AlertSeverity::Warning => {
                warn!(provider = ?alert.provider, "{}: {}", alert.severity, alert.message)
            }
            AlertSeverity::Error | AlertSeverity::Critical => {
                error!(provider = ?alert.provider, "{}: {}", alert.severity, alert.message)
            }
        }

        let mut storage = self.inner.write();
        let capacity = storage.capacity;
        storage.history.push_bounded(alert.clone(), capacity);
        alert
    }

    /// Number of retained alerts
    pub fn len(&self) -> usize {
        self.inner.read().history.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().history.is_empty()
    }

    /// Retained alerts, oldest first
    pub fn history(&self) -> Vec<HealthAlert> {
        self.inner.read().history.iter().cloned().collect()
    }

    /// The most recent alerts, newest first (default limit 100)
    pub fn recent(&self, limit: Option<usize>) -> Vec<HealthAlert> {
        let storage = self.inner.read();
        let limit = limit.unwrap_or(100);
        storage.history.iter().rev().take(limit).cloned().collect()
    }

    /// Mark the alert at `index` (into the retained history, oldest first) resolved
    pub fn resolve(&self, index: usize) -> Result<()> {
        let mut storage = self.inner.write();
        match storage.history.get_mut(index) {
            Some(alert) => {
                alert.resolved = true;
                Ok(())
            }
            None => Err(MonitorError::Alert(format!(
                "no alert at index {} (history length {})",
                index,
                storage.history.len()
            ))),
        }
    }

    /// Purge resolved alerts, returning how many were removed
    pub fn clear_resolved(&self) -> usize {
        let mut storage = self.inner.write();
        let before = storage.history.len();
        storage.history.retain(|alert| !alert.resolved);
        before - storage.history.len()
    }

    /// Change the capacity, trimming the oldest entries when shrinking
    pub fn set_capacity(&self, capacity: usize) {
        let mut storage = self.inner.write();
        storage.capacity = capacity;
        storage.history.trim_to(capacity);
    }

    /// Count of unresolved alerts
    pub fn unresolved(&self) -> usize {
        self.inner
            .read()
            .history
            .iter()
            .filter(|alert| !alert.resolved)
            .count()
    }
}
