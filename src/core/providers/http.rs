//! Shared HTTP plumbing for Ollama-compatible backends
//!
//! Both inference servers expose the same endpoint surface: `GET /` for
//! readiness, `GET /api/tags` for model listing, `POST /api/generate` for
//! generation, and `GET /api/status` for the server status document.

use super::{GenerateResponse, TagsResponse};
use crate::config::ProviderEndpoint;
use crate::utils::error::{MonitorError, Result};
use serde_json::json;
use url::Url;

/// Reusable client for an Ollama-compatible HTTP API
#[derive(Debug, Clone)]
pub(crate) struct OllamaHttpClient {
    base_url: Url,
    model: String,
    client: reqwest::Client,
}

impl OllamaHttpClient {
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self> {
        let base_url = Url::parse(&endpoint.base_url)
            .map_err(|e| MonitorError::Config(format!("invalid base_url: {}", e)))?;
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout())
            .build()?;

        Ok(Self {
            base_url,
            model: endpoint.default_model.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| MonitorError::Config(format!("invalid endpoint path {}: {}", path, e)))
    }

    pub async fn is_available(&self) -> Result<bool> {
        let response = self.client.get(self.endpoint("/")?).send().await?;
        Ok(response.status().is_success())
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(self.endpoint("/api/generate")?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MonitorError::Provider(format!(
                "generate returned HTTP {}",
                response.status()
            )));
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated.response)
    }

    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self.client.get(self.endpoint("/api/tags")?).send().await?;

        if !response.status().is_success() {
            return Err(MonitorError::Provider(format!(
                "model listing returned HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    pub async fn server_status(&self) -> Result<serde_json::Value> {
        let response = self.client.get(self.endpoint("/api/status")?).send().await?;

        if !response.status().is_success() {
            return Err(MonitorError::Provider(format!(
                "status returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}
