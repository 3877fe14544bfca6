//! Multi-stage provider health probe
//!
//! Runs a fixed battery of checks against one provider and reduces the
//! outcomes to a single service verdict. Every check absorbs its own failure
//! into a [`HealthCheckResult`]; nothing propagates to the scheduling loop.
//! Latest results are retained per (provider, check) pair so availability
//! lookups and consecutive-failure counters survive between cycles.

use super::alerts::AlertManager;
use super::metrics::MetricStore;
use super::types::{
    AlertSeverity, HEALTH_CHECK_OPERATION, HealthCheckResult, MetricRecord, ServiceHealth,
    ServiceStatus,
};
use crate::core::providers::ProviderClient;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Check names as they appear in [`ServiceHealth::checks`]
pub const CHECK_CONNECTIVITY: &str = "connectivity";
pub const CHECK_PERFORMANCE: &str = "performance";
pub const CHECK_MODELS: &str = "models";
pub const CHECK_RESOURCES: &str = "resources";

/// Ceiling for the synthetic performance request
const PERFORMANCE_CEILING: Duration = Duration::from_secs(10);

/// Minimal prompt for the synthetic request
const PROBE_PROMPT: &str = "ping";

/// Probe runner with retained per-(provider, check) results
#[derive(Debug, Clone)]
pub struct HealthProbe {
    metrics: MetricStore,
    alerts: AlertManager,
    results: Arc<RwLock<HashMap<String, HashMap<String, HealthCheckResult>>>>,
}

impl HealthProbe {
    /// Create a probe writing synthetic metrics and alerts into the given stores
    pub fn new(metrics: MetricStore, alerts: AlertManager) -> Self {
        Self {
            metrics,
            alerts,
            results: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Latest retained result for a (provider, check) pair
    pub fn latest(&self, provider: &str, check: &str) -> Option<HealthCheckResult> {
        self.results
            .read()
            .get(provider)
            .and_then(|checks| checks.get(check))
            .cloned()
    }

    /// Store a connectivity outcome produced outside the full battery
    ///
    /// Used by the lightweight availability poll so stats lookups see fresh
    /// availability between full probe cycles.
    pub fn record_connectivity(
        &self,
        provider: &str,
        available: bool,
        latency_ms: u64,
        error: Option<String>,
    ) -> HealthCheckResult {
        let result = if available {
            HealthCheckResult::ok(provider, latency_ms)
        } else {
            let failures = self.prior_failures(provider, CHECK_CONNECTIVITY) + 1;
            HealthCheckResult::failed(
                provider,
                latency_ms,
                error.unwrap_or_else(|| "provider reported unavailable".to_string()),
                failures,
            )
        };
        self.store(CHECK_CONNECTIVITY, result.clone());
        result
    }

    /// Run the full check battery against one provider
    ///
    /// A failed connectivity check short-circuits the battery: probing
    /// generation or model access is pointless when the server is unreachable,
    /// and the reduction then sees a fully-failed check set.
    pub async fn check_provider(&self, provider: &dyn ProviderClient) -> ServiceHealth {
        let id = provider.id().to_string();
        debug!("Running health checks for provider {}", id);

        let mut checks = HashMap::new();

        let connectivity = self.check_connectivity(provider).await;
        let connected = connectivity.available;
        checks.insert(CHECK_CONNECTIVITY.to_string(), connectivity);

        if connected {
            checks.insert(
                CHECK_PERFORMANCE.to_string(),
                self.check_performance(provider).await,
            );
            checks.insert(CHECK_MODELS.to_string(), self.check_models(provider).await);
            if provider.supports_server_status() {
                checks.insert(
                    CHECK_RESOURCES.to_string(),
                    self.check_resources(provider).await,
                );
            }
        }

        let (status, mut recommendations) = reduce(&checks);

        for (check, recommendation) in [
            (
                CHECK_CONNECTIVITY,
                "Verify the server is running and reachable at its configured address",
            ),
            (
                CHECK_PERFORMANCE,
                "Synthetic request is slow or failing; check server load and batch queue depth",
            ),
            (
                CHECK_MODELS,
                "No models are being served; load or configure at least one model",
            ),
        ] {
            if checks.get(check).is_some_and(|r| !r.available) {
                recommendations.push(recommendation.to_string());
            }
        }

        let total = checks.len();
        let passing = checks.values().filter(|r| r.available).count();
        let summary = format!("{}: {} ({}/{} checks passing)", id, status, passing, total);

        ServiceHealth {
            provider: id,
            status,
            checks,
            summary,
            recommendations,
        }
    }

    async fn check_connectivity(&self, provider: &dyn ProviderClient) -> HealthCheckResult {
        let start = Instant::now();
        let outcome = provider.is_available().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(true) => None,
            Ok(false) => Some("provider reported unavailable".to_string()),
            Err(e) => Some(e.to_string()),
        };
        self.finish(CHECK_CONNECTIVITY, provider.id(), latency_ms, error)
    }

    async fn check_performance(&self, provider: &dyn ProviderClient) -> HealthCheckResult {
        let start = Instant::now();
        let outcome =
            tokio::time::timeout(PERFORMANCE_CEILING, provider.generate_text(PROBE_PROMPT)).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let error = match outcome {
            Err(_) => Some(format!(
                "synthetic request timed out after {}s",
                PERFORMANCE_CEILING.as_secs()
            )),
            Ok(Err(e)) => Some(e.to_string()),
            Ok(Ok(text)) if text.trim().is_empty() => {
                Some("synthetic request returned empty output".to_string())
            }
            Ok(Ok(_)) if latency_ms >= PERFORMANCE_CEILING.as_millis() as u64 => {
                Some("synthetic request latency above ceiling".to_string())
            }
            Ok(Ok(_)) => None,
        };

        // Synthetic probe traffic lands in the same metric history as real
        // operations, success or not.
        let mut record = MetricRecord::new(
            provider.id(),
            HEALTH_CHECK_OPERATION,
            latency_ms,
            error.is_none(),
        );
        record.error_kind = error.clone();
        self.metrics.record(record);

        self.finish(CHECK_PERFORMANCE, provider.id(), latency_ms, error)
    }

    async fn check_models(&self, provider: &dyn ProviderClient) -> HealthCheckResult {
        let start = Instant::now();
        let outcome = provider.list_models().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(models) if models.is_empty() => {
                self.alerts.raise(
                    AlertSeverity::Warning,
                    format!("provider {} is serving no models", provider.id()),
                    Some(provider.id().to_string()),
                );
                Some("no models available".to_string())
            }
            Ok(_) => None,
            Err(e) => {
                self.alerts.raise(
                    AlertSeverity::Error,
                    format!("model listing failed for {}: {}", provider.id(), e),
                    Some(provider.id().to_string()),
                );
                Some(e.to_string())
            }
        };
        self.finish(CHECK_MODELS, provider.id(), latency_ms, error)
    }

    async fn check_resources(&self, provider: &dyn ProviderClient) -> HealthCheckResult {
        let start = Instant::now();
        let outcome = provider.server_status().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
        self.finish(CHECK_RESOURCES, provider.id(), latency_ms, error)
    }

    /// Build the result for a finished check, threading the consecutive-failure
    /// count from the prior retained result, and retain it
    fn finish(
        &self,
        check: &str,
        provider: &str,
        latency_ms: u64,
        error: Option<String>,
    ) -> HealthCheckResult {
        let result = match error {
            None => HealthCheckResult::ok(provider, latency_ms),
            Some(message) => {
                let failures = self.prior_failures(provider, check) + 1;
                HealthCheckResult::failed(provider, latency_ms, message, failures)
            }
        };
        self.store(check, result.clone());
        result
    }

    fn prior_failures(&self, provider: &str, check: &str) -> u32 {
        self.results
            .read()
            .get(provider)
            .and_then(|checks| checks.get(check))
            .map(|r| r.consecutive_failures)
            .unwrap_or(0)
    }

    fn store(&self, check: &str, result: HealthCheckResult) {
        self.results
            .write()
            .entry(result.provider.clone())
            .or_default()
            .insert(check.to_string(), result);
    }
}

/// Reduce check outcomes to a service verdict plus base recommendations
///
/// Rules, evaluated in order over `failed` = failing checks and `total` =
/// checks run: none failed is healthy; all failed is unhealthy; exactly one
/// failed is degraded; several (but not all) failed is degraded with a
/// configuration-level recommendation.
pub(crate) fn reduce(checks: &HashMap<String, HealthCheckResult>) -> (ServiceStatus, Vec<String>) {
    let total = checks.len();
    let failed = checks.values().filter(|r| !r.available).count();

    if total == 0 {
        return (ServiceStatus::Unknown, Vec::new());
    }

    if failed == 0 {
        (ServiceStatus::Healthy, Vec::new())
    } else if failed == total {
        (
            ServiceStatus::Unhealthy,
            vec!["All checks failing; restart the service".to_string()],
        )
    } else if failed == 1 {
        (
            ServiceStatus::Degraded,
            vec!["One check failing; monitor for recovery".to_string()],
        )
    } else {
        (
            ServiceStatus::Degraded,
            vec!["Multiple checks failing; investigate provider configuration".to_string()],
        )
    }
}
