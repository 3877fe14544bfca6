//! Derived performance insights
//!
//! Compares the providers' rolling statistics into human-readable
//! recommendations, bottlenecks, and optimizations, grades overall health
//! against fixed bands, and optionally merges insights contributed by an
//! external optimizer.

use super::types::{HealthGrade, PerformanceInsights, ProviderStats};
use crate::core::collaborators::OptimizerCollaborator;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Insight generator, optionally backed by an optimizer collaborator
#[derive(Clone, Default)]
pub struct InsightsEngine {
    optimizer: Option<Arc<dyn OptimizerCollaborator>>,
}

impl InsightsEngine {
    /// Engine without an optimizer collaborator
    pub fn new() -> Self {
        Self { optimizer: None }
    }

    /// Engine merging insights from the given optimizer
    pub fn with_optimizer(optimizer: Arc<dyn OptimizerCollaborator>) -> Self {
        Self {
            optimizer: Some(optimizer),
        }
    }

    /// Generate insights from per-provider statistics, in configuration order
    pub async fn generate(&self, stats: &[(String, ProviderStats)]) -> PerformanceInsights {
        let mut recommendations = Vec::new();
        let mut bottlenecks = Vec::new();
        let mut optimizations = Vec::new();

        for (id, s) in stats {
            if s.total_requests > 0 && s.success_rate < 0.9 {
                bottlenecks.push(format!(
                    "{} success rate is {:.1}%, below the 90% reliability floor",
                    id,
                    s.success_rate * 100.0
                ));
            }
        }

        if let [(a_id, a), (b_id, b), ..] = stats {
            compare_latency(a_id, a, b_id, b, &mut recommendations);
            compare_latency(b_id, b, a_id, a, &mut recommendations);
            compare_throughput(a_id, a, b_id, b, &mut optimizations);
            compare_throughput(b_id, b, a_id, a, &mut optimizations);

            if a.success_rate > b.success_rate {
                recommendations.push(format!(
                    "Prefer {} for reliability-critical work ({:.1}% vs {:.1}% success)",
                    a_id,
                    a.success_rate * 100.0,
                    b.success_rate * 100.0
                ));
            } else if b.success_rate > a.success_rate {
                recommendations.push(format!(
                    "Prefer {} for reliability-critical work ({:.1}% vs {:.1}% success)",
                    b_id,
                    b.success_rate * 100.0,
                    a.success_rate * 100.0
                ));
            }
        }

        if let Some(optimizer) = &self.optimizer {
            match optimizer.performance_insights().await {
                Ok(extra) => {
                    recommendations.extend(extra.recommendations);
                    bottlenecks.extend(extra.bottlenecks);
                    optimizations.extend(extra.optimizations);
                }
                Err(e) => debug!("Optimizer insights unavailable: {}", e),
            }
        }

        PerformanceInsights {
            generated_at: Utc::now(),
            overall_health: grade(stats),
            recommendations,
            bottlenecks,
            optimizations,
        }
    }
}

fn compare_latency(
    slow_id: &str,
    slow: &ProviderStats,
    fast_id: &str,
    fast: &ProviderStats,
    recommendations: &mut Vec<String>,
) {
    if slow.avg_latency_ms > 0.0
        && fast.avg_latency_ms > 0.0
        && slow.avg_latency_ms > fast.avg_latency_ms * 1.5
    {
        recommendations.push(format!(
            "{} averages {:.0}ms vs {:.0}ms for {}; shift latency-sensitive load toward {}",
            slow_id, slow.avg_latency_ms, fast.avg_latency_ms, fast_id, fast_id
        ));
    }
}

fn compare_throughput(
    high_id: &str,
    high: &ProviderStats,
    low_id: &str,
    low: &ProviderStats,
    optimizations: &mut Vec<String>,
) {
    if high.throughput > 0.0 && high.throughput > low.throughput * 2.0 {
        optimizations.push(format!(
            "{} sustains {:.2} req/s vs {:.2} req/s for {}; route batch and high-throughput workloads to {}",
            high_id, high.throughput, low.throughput, low_id, high_id
        ));
    }
}

/// Grade overall health from averaged success rate, latency, and availability
///
/// Bands are evaluated best-first; the first fully-satisfied band wins.
fn grade(stats: &[(String, ProviderStats)]) -> HealthGrade {
    if stats.is_empty() {
        return HealthGrade::Poor;
    }

    let n = stats.len() as f64;
    let success_rate = stats.iter().map(|(_, s)| s.success_rate).sum::<f64>() / n;
    let latency = stats.iter().map(|(_, s)| s.avg_latency_ms).sum::<f64>() / n;
    let availability = stats.iter().map(|(_, s)| s.availability).sum::<f64>() / n;

    if success_rate > 0.95 && latency < 1000.0 && availability > 0.95 {
        HealthGrade::Excellent
    } else if success_rate > 0.9 && latency < 2000.0 && availability > 0.9 {
        HealthGrade::Good
    } else if success_rate > 0.8 && latency < 5000.0 && availability > 0.8 {
        HealthGrade::Fair
    } else {
        HealthGrade::Poor
    }
}
