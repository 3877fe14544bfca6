//! Performance monitor facade
//!
//! The single owner of the monitoring state: metric history, alert history,
//! probe, health-check service, and insight engine all live for exactly the
//! lifetime of this instance and are torn down via [`stop`](PerformanceMonitor::stop).
//! Request-handling code feeds it outcomes through
//! [`record_metric`](PerformanceMonitor::record_metric); callers query it for
//! system health, insights, alerts, and exports.

use super::alerts::AlertManager;
use super::insights::InsightsEngine;
use super::metrics::MetricStore;
use super::probe::{CHECK_CONNECTIVITY, HealthProbe};
use super::service::HealthCheckService;
use super::types::{
    AlertSeverity, HealthAlert, MetricRecord, PerformanceInsights, ProviderStats, ServiceHealth,
    SystemHealth,
};
use crate::config::{ConfigUpdate, MonitorConfig, MonitoringConfig};
use crate::core::collaborators::{OptimizerCollaborator, RouterCollaborator};
use crate::core::providers::{ProviderClient, build_provider};
use crate::utils::error::Result;
use chrono::Utc;
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Number of most recent metrics considered by the rolling success-rate window
const ROLLING_WINDOW: usize = 10;

/// Minimum metrics in the window before the rolling rate is evaluated
const ROLLING_MIN_SAMPLES: usize = 5;

/// Monitoring orchestrator for the configured providers
#[derive(Clone)]
pub struct PerformanceMonitor {
    providers: Arc<Vec<Arc<dyn ProviderClient>>>,
    config: Arc<RwLock<MonitoringConfig>>,
    metrics: MetricStore,
    alerts: AlertManager,
    probe: HealthProbe,
    service: HealthCheckService,
    insights: InsightsEngine,
    router: Option<Arc<dyn RouterCollaborator>>,
    active: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
    poll_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    started_at: Instant,
}

impl PerformanceMonitor {
    /// Create a monitor over the given provider clients
    pub fn new(config: MonitoringConfig, providers: Vec<Arc<dyn ProviderClient>>) -> Self {
        let providers = Arc::new(providers);
        let metrics = MetricStore::new(config.max_metric_history);
        let alerts = AlertManager::new(config.max_alert_history);
        let probe = HealthProbe::new(metrics.clone(), alerts.clone());
        let service = HealthCheckService::new(
            providers.clone(),
            probe.clone(),
            alerts.clone(),
            config.check_interval(),
        );

        Self {
            providers,
            config: Arc::new(RwLock::new(config)),
            metrics,
            alerts,
            probe,
            service,
            insights: InsightsEngine::new(),
            router: None,
            active: Arc::new(AtomicBool::new(false)),
            stop_signal: Arc::new(Notify::new()),
            poll_task: Arc::new(Mutex::new(None)),
            started_at: Instant::now(),
        }
    }

    /// Create a monitor from a full configuration, building provider clients
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        let providers = config
            .providers
            .iter()
            .map(build_provider)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(config.monitoring.clone(), providers))
    }

    /// Attach a router collaborator backing the availability poll
    pub fn with_router(mut self, router: Arc<dyn RouterCollaborator>) -> Self {
        self.router = Some(router);
        self
    }

    /// Attach an optimizer collaborator whose insights get merged into reports
    pub fn with_optimizer(mut self, optimizer: Arc<dyn OptimizerCollaborator>) -> Self {
        self.insights = InsightsEngine::with_optimizer(optimizer);
        self
    }

    /// Whether the monitor's scheduled loops are running
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Start the health-check cycle and the availability poll; idempotent
    pub fn start(&self) {
        if self.active.swap(true, Ordering::AcqRel) {
            warn!("Performance monitor already running, ignoring start");
            return;
        }
        info!("Starting performance monitor");

        self.service.start();

        let monitor = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                if !monitor.active.load(Ordering::Acquire) {
                    break;
                }
                // Register for the stop signal before polling, so a
                // notification arriving mid-poll is not lost before select
                // polls for it.
                tokio::pin! {
                    let stopped = monitor.stop_signal.notified();
                }
                stopped.as_mut().enable();

                monitor.poll_availability().await;
                if !monitor.active.load(Ordering::Acquire) {
                    break;
                }
                let interval = monitor.config.read().poll_interval();
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = &mut stopped => break,
                }
            }
            debug!("Availability poll loop exited");
        });
        *self.poll_task.lock() = Some(handle);
    }

    /// Stop the scheduled loops; idempotent
    ///
    /// In-flight work finishes and its results are applied; only future
    /// cycles are prevented.
    pub async fn stop(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            debug!("Performance monitor already stopped");
            return;
        }
        info!("Stopping performance monitor");
        self.stop_signal.notify_waiters();

        let handle = self.poll_task.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        self.service.stop().await;
    }

    /// Ingest one operation outcome and evaluate alert thresholds on it
    pub fn record_metric(&self, record: MetricRecord) {
        let provider = record.provider.clone();
        let snapshot = self.metrics.record(record);
        let thresholds = self.config.read().thresholds;

        if snapshot.duration_ms > thresholds.latency_error_ms {
            self.alerts.raise(
                AlertSeverity::Error,
                format!(
                    "{} {} took {}ms, above the {}ms error threshold",
                    provider, snapshot.operation, snapshot.duration_ms, thresholds.latency_error_ms
                ),
                Some(provider.clone()),
            );
        } else if snapshot.duration_ms > thresholds.latency_warning_ms {
            self.alerts.raise(
                AlertSeverity::Warning,
                format!(
                    "{} {} took {}ms, above the {}ms warning threshold",
                    provider,
                    snapshot.operation,
                    snapshot.duration_ms,
                    thresholds.latency_warning_ms
                ),
                Some(provider.clone()),
            );
        }

        let recent = self.metrics.recent_for(&provider, ROLLING_WINDOW);
        if recent.len() >= ROLLING_MIN_SAMPLES {
            let successes = recent.iter().filter(|s| s.success).count();
            let rate = successes as f64 / recent.len() as f64;
            if rate < thresholds.success_rate_error {
                self.alerts.raise(
                    AlertSeverity::Error,
                    format!(
                        "{} rolling success rate dropped to {:.1}%",
                        provider,
                        rate * 100.0
                    ),
                    Some(provider),
                );
            } else if rate < thresholds.success_rate_warning {
                self.alerts.raise(
                    AlertSeverity::Warning,
                    format!(
                        "{} rolling success rate at {:.1}%",
                        provider,
                        rate * 100.0
                    ),
                    Some(provider),
                );
            }
        }
    }

    /// Rolling statistics for one provider
    ///
    /// Availability comes from the latest connectivity check, not from the
    /// metric history.
    pub fn provider_stats(&self, provider_id: &str) -> ProviderStats {
        let connectivity = self.probe.latest(provider_id, CHECK_CONNECTIVITY);
        self.metrics.stats(provider_id, connectivity.as_ref())
    }

    /// Probe every provider and roll up into system health
    pub async fn get_system_health(&self) -> SystemHealth {
        self.service.system_health().await
    }

    /// Probe a single configured provider
    pub async fn get_service_health(&self, provider_id: &str) -> Option<ServiceHealth> {
        self.service.service_health(provider_id).await
    }

    /// Generate comparative insights across the configured providers
    pub async fn generate_insights(&self) -> PerformanceInsights {
        let stats: Vec<(String, ProviderStats)> = self
            .providers
            .iter()
            .map(|p| (p.id().to_string(), self.provider_stats(p.id())))
            .collect();
        self.insights.generate(&stats).await
    }

    /// Most recent alerts, newest first (default limit 100)
    pub fn get_recent_alerts(&self, limit: Option<usize>) -> Vec<HealthAlert> {
        self.alerts.recent(limit)
    }

    /// Mark the alert at `index` (oldest first) resolved
    pub fn resolve_alert(&self, index: usize) -> Result<()> {
        self.alerts.resolve(index)
    }

    /// Purge resolved alerts, returning how many were removed
    pub fn clear_resolved_alerts(&self) -> usize {
        self.alerts.clear_resolved()
    }

    /// Snapshot of metric and alert state for external reporting
    ///
    /// JSON-shaped for convenience; not a stable wire format.
    pub fn export_monitoring_data(&self) -> Value {
        let stats: HashMap<String, ProviderStats> = self
            .providers
            .iter()
            .map(|p| (p.id().to_string(), self.provider_stats(p.id())))
            .collect();

        json!({
            "generated_at": Utc::now(),
            "uptime_secs": self.started_at.elapsed().as_secs(),
            "providers": stats,
            "metrics": {
                "recorded": self.metrics.len(),
                "capacity": self.metrics.capacity(),
            },
            "alerts": {
                "retained": self.alerts.len(),
                "unresolved": self.alerts.unresolved(),
                "recent": self.alerts.recent(Some(20)),
            },
        })
    }

    /// Full health report: fresh system health plus generated insights
    pub async fn export_health_report(&self) -> Value {
        let system = self.get_system_health().await;
        let insights = self.generate_insights().await;

        json!({
            "generated_at": Utc::now(),
            "system": system,
            "insights": insights,
        })
    }

    /// Apply a runtime configuration update
    ///
    /// Validation failures are returned synchronously and nothing is applied.
    /// Capacity changes trim the oldest entries when shrinking; an interval
    /// change while running restarts the loops with history intact.
    pub async fn update_configuration(&self, update: ConfigUpdate) -> Result<()> {
        update.validate()?;

        let mut intervals_changed = false;
        {
            let mut config = self.config.write();
            if let Some(capacity) = update.max_metric_history {
                config.max_metric_history = capacity;
                self.metrics.set_capacity(capacity);
            }
            if let Some(capacity) = update.max_alert_history {
                config.max_alert_history = capacity;
                self.alerts.set_capacity(capacity);
            }
            if let Some(thresholds) = update.thresholds {
                config.thresholds = thresholds;
            }
            if let Some(secs) = update.check_interval_secs {
                config.check_interval_secs = secs;
                self.service.set_interval(Duration::from_secs(secs));
                intervals_changed = true;
            }
            if let Some(secs) = update.poll_interval_secs {
                config.poll_interval_secs = secs;
                intervals_changed = true;
            }
        }

        if intervals_changed && self.is_active() {
            info!("Monitoring intervals changed, restarting scheduled loops");
            self.stop().await;
            self.start();
        }
        Ok(())
    }

    /// One lightweight availability pass over all providers
    ///
    /// Uses the router's view when a router collaborator is attached and
    /// answers; otherwise asks each provider directly.
    pub(crate) async fn poll_availability(&self) {
        let router_view = match &self.router {
            Some(router) => match router.provider_status().await {
                Ok(view) => Some(view),
                Err(e) => {
                    debug!("Router status unavailable, polling providers directly: {}", e);
                    None
                }
            },
            None => None,
        };

        let polls = self.providers.iter().map(|provider| {
            let router_view = router_view.as_ref();
            async move {
                let id = provider.id();
                match router_view.and_then(|view| view.get(id).copied()) {
                    Some(available) => {
                        self.probe.record_connectivity(
                            id,
                            available,
                            0,
                            (!available).then(|| "router reports provider unavailable".to_string()),
                        );
                    }
                    None => {
                        let start = Instant::now();
                        let outcome = provider.is_available().await;
                        let latency_ms = start.elapsed().as_millis() as u64;
                        let (available, error) = match outcome {
                            Ok(true) => (true, None),
                            Ok(false) => (false, Some("provider reported unavailable".to_string())),
                            Err(e) => (false, Some(e.to_string())),
                        };
                        self.probe.record_connectivity(id, available, latency_ms, error);
                    }
                }
            }
        });
        join_all(polls).await;
    }
}
