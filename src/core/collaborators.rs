//! Optional collaborator interfaces
//!
//! The orchestrator can be constructed with references to an external router
//! and an external optimizer. Both are optional: when absent, the features
//! they back (router-driven availability polling, insight merging) silently
//! degrade instead of failing.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// External router that already knows which providers are reachable
#[async_trait]
pub trait RouterCollaborator: Send + Sync {
    /// Current reachability per provider id
    async fn provider_status(&self) -> Result<HashMap<String, bool>>;
}

/// External optimizer contributing its own performance insights
#[async_trait]
pub trait OptimizerCollaborator: Send + Sync {
    /// Insights to merge into a generated report
    async fn performance_insights(&self) -> Result<OptimizerInsights>;
}

/// Insight sets contributed by an optimizer collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerInsights {
    /// Suggested actions
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Identified bottlenecks
    #[serde(default)]
    pub bottlenecks: Vec<String>,
    /// Possible optimizations
    #[serde(default)]
    pub optimizations: Vec<String>,
}
