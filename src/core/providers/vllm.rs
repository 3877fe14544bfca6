//! vLLM provider client
//!
//! The local single-instance backend. Speaks the same Ollama-compatible API
//! as LMDeploy, including the server status document.

use super::ProviderClient;
use super::http::OllamaHttpClient;
use crate::config::ProviderEndpoint;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Client for a vLLM inference server
#[derive(Debug, Clone)]
pub struct VllmProvider {
    id: String,
    http: OllamaHttpClient,
}

impl VllmProvider {
    /// Create a client for the configured endpoint
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self> {
        Ok(Self {
            id: endpoint.id.clone(),
            http: OllamaHttpClient::new(endpoint)?,
        })
    }
}

#[async_trait]
impl ProviderClient for VllmProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_available(&self) -> Result<bool> {
        self.http.is_available().await
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.http.generate_text(prompt).await
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        self.http.list_models().await
    }

    fn supports_server_status(&self) -> bool {
        true
    }

    async fn server_status(&self) -> Result<serde_json::Value> {
        self.http.server_status().await
    }
}
