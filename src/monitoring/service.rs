//! Health check orchestration
//!
//! Owns the recurring health-check cycle: probes every configured provider in
//! order, rolls the verdicts up into a system-wide status, and raises
//! system-level alerts. The loop is trailing-edge scheduled: it re-arms only
//! after the previous cycle completes, so cycles never overlap and
//! consecutive-failure counters stay consistent even when a cycle outruns the
//! interval.

use super::alerts::AlertManager;
use super::probe::HealthProbe;
use super::types::{AlertSeverity, ServiceHealth, ServiceStatus, SystemHealth, SystemStatus};
use crate::core::providers::ProviderClient;
use crate::utils::error::Result;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Recurring health-check orchestrator
#[derive(Clone)]
pub struct HealthCheckService {
    providers: Arc<Vec<Arc<dyn ProviderClient>>>,
    probe: HealthProbe,
    alerts: AlertManager,
    interval: Arc<RwLock<Duration>>,
    active: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
    started_at: Instant,
}

impl HealthCheckService {
    /// Create a service probing the given providers at `interval`
    pub fn new(
        providers: Arc<Vec<Arc<dyn ProviderClient>>>,
        probe: HealthProbe,
        alerts: AlertManager,
        interval: Duration,
    ) -> Self {
        Self {
            providers,
            probe,
            alerts,
            interval: Arc::new(RwLock::new(interval)),
            active: Arc::new(AtomicBool::new(false)),
            stop_signal: Arc::new(Notify::new()),
            task: Arc::new(Mutex::new(None)),
            started_at: Instant::now(),
        }
    }

    /// Whether the scheduling loop is running
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Start the scheduling loop; a no-op when already running
    ///
    /// Runs one cycle immediately, then re-arms after each completed cycle.
    pub fn start(&self) {
        if self.active.swap(true, Ordering::AcqRel) {
            warn!("Health check service already running, ignoring start");
            return;
        }
        info!("Starting health check service");

        let service = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                if !service.active.load(Ordering::Acquire) {
                    break;
                }
                // Register for the stop signal before the cycle runs, so a
                // notification arriving mid-cycle is not lost before select
                // polls for it.
                tokio::pin! {
                    let stopped = service.stop_signal.notified();
                }
                stopped.as_mut().enable();

                if let Err(e) = service.run_cycle().await {
                    warn!("Health check cycle failed: {}", e);
                    service.alerts.raise(
                        AlertSeverity::Error,
                        format!("health check cycle failed: {}", e),
                        None,
                    );
                }
                if !service.active.load(Ordering::Acquire) {
                    break;
                }
                let interval = *service.interval.read();
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = &mut stopped => break,
                }
            }
            debug!("Health check loop exited");
        });
        *self.task.lock() = Some(handle);
    }

    /// Stop the scheduling loop; a no-op when already stopped
    ///
    /// Prevents future cycles from starting. An in-flight cycle is not
    /// aborted; its results are applied before the loop winds down.
    pub async fn stop(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            debug!("Health check service already stopped");
            return;
        }
        info!("Stopping health check service");
        self.stop_signal.notify_waiters();

        let handle = self.task.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Change the cycle interval; takes effect at the next re-arm
    pub fn set_interval(&self, interval: Duration) {
        *self.interval.write() = interval;
    }

    /// One scheduled cycle: rollup plus system-level alerting
    ///
    /// Any cycle-level error is caught by the loop and converted into an
    /// error alert; the loop itself never stops on failure.
    async fn run_cycle(&self) -> Result<()> {
        let health = self.system_health().await;
        match health.overall {
            SystemStatus::Unhealthy => {
                self.alerts.raise(
                    AlertSeverity::Critical,
                    "all monitored providers are unhealthy",
                    None,
                );
            }
            SystemStatus::Degraded => {
                self.alerts.raise(
                    AlertSeverity::Warning,
                    "system degraded: at least one provider is unhealthy",
                    None,
                );
            }
            SystemStatus::Healthy => {}
        }
        Ok(())
    }

    /// Probe every configured provider sequentially and roll up
    ///
    /// Always returns a well-formed value, even when every provider is
    /// unreachable.
    pub async fn system_health(&self) -> SystemHealth {
        let mut services = Vec::with_capacity(self.providers.len());
        for provider in self.providers.iter() {
            services.push(self.probe.check_provider(provider.as_ref()).await);
        }

        SystemHealth {
            overall: overall_status(&services),
            services,
            timestamp: Utc::now(),
            uptime_secs: self.started_at.elapsed().as_secs(),
            recent_alerts: self.alerts.recent(Some(10)),
        }
    }

    /// Probe a single configured provider by id
    pub async fn service_health(&self, provider_id: &str) -> Option<ServiceHealth> {
        let provider = self.providers.iter().find(|p| p.id() == provider_id)?;
        Some(self.probe.check_provider(provider.as_ref()).await)
    }
}

/// Roll per-service verdicts up into the system verdict
///
/// Zero unhealthy services is healthy (degraded services do not demote the
/// rollup); all services unhealthy is unhealthy; anything in between is
/// degraded.
pub(crate) fn overall_status(services: &[ServiceHealth]) -> SystemStatus {
    let unhealthy = services
        .iter()
        .filter(|s| s.status == ServiceStatus::Unhealthy)
        .count();

    if unhealthy == 0 {
        SystemStatus::Healthy
    } else if unhealthy == services.len() {
        SystemStatus::Unhealthy
    } else {
        SystemStatus::Degraded
    }
}
