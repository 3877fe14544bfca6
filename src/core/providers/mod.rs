//! Provider client interface
//!
//! Unified capability interface for the monitored inference backends. Both
//! shipped backends speak the same Ollama-compatible HTTP API, so the concrete
//! clients differ only in identity and capability surface; the trait is what
//! the health probe and the orchestrator program against.

mod http;
mod lmdeploy;
mod vllm;

pub use lmdeploy::LmdeployProvider;
pub use vllm::VllmProvider;

use crate::config::{ProviderEndpoint, ProviderKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Capability interface for a monitored inference backend
///
/// Every method may fail; callers own the conversion of failures into health
/// data. The server-status capability is optional: providers that do not
/// expose a status endpoint keep the default implementation and the resource
/// check is omitted from their probe battery.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Provider identifier used in metrics, alerts, and health reports
    fn id(&self) -> &str;

    /// Whether the backend is reachable and reports itself ready
    async fn is_available(&self) -> Result<bool>;

    /// Issue a text generation request and return the generated text
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// List the models the backend currently serves
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Whether [`server_status`](Self::server_status) is implemented
    fn supports_server_status(&self) -> bool {
        false
    }

    /// Raw server status document, for backends that expose one
    async fn server_status(&self) -> Result<serde_json::Value> {
        Err(crate::utils::error::MonitorError::Provider(format!(
            "{}: server status not supported",
            self.id()
        )))
    }
}

/// Construct a provider client from its configured endpoint
pub fn build_provider(endpoint: &ProviderEndpoint) -> Result<Arc<dyn ProviderClient>> {
    Ok(match endpoint.kind {
        ProviderKind::Lmdeploy => Arc::new(LmdeployProvider::new(endpoint)?),
        ProviderKind::Vllm => Arc::new(VllmProvider::new(endpoint)?),
    })
}

/// Ollama-compatible `/api/tags` response
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelTag {
    pub name: String,
}

/// Ollama-compatible non-streaming `/api/generate` response
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub response: String,
    #[allow(dead_code)]
    pub done: bool,
}
