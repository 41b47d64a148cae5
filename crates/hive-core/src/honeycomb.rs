//! ============================================================================
//! Honeycomb Projects - Admin registry over the Honeycomb edge API
//! ============================================================================
//! The admin panel lists Honeycomb projects and toggles them on/off. Toggles
//! are applied optimistically and reverted when the API call fails; the
//! failure is logged and returned to the caller.
//! ============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default Honeycomb edge endpoint
pub const DEFAULT_API_URL: &str = "https://edge.main.honeycombprotocol.com";

/// A Honeycomb project as shown in the admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub address: String,
    pub is_active: bool,
    #[serde(default)]
    pub name: Option<String>,
}

/// The remote project API. Seam for testing the registry without a network.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn set_project_active(&self, address: &str, active: bool) -> Result<()>;
}

/// HTTP client against the Honeycomb edge API
pub struct HoneycombClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HoneycombClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Build from environment (HONEYCOMB_API_URL, HONEYCOMB_API_KEY)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("HONEYCOMB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url, std::env::var("HONEYCOMB_API_KEY").ok())
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {}", key)),
            None => builder,
        }
    }
}

#[async_trait]
impl ProjectApi for HoneycombClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = format!("{}/projects", self.base_url);
        debug!("Listing projects: {}", url);

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to list projects: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Honeycomb list error {}: {}", status, body));
        }

        response
            .json::<Vec<Project>>()
            .await
            .map_err(|e| anyhow!("Failed to parse project list: {}", e))
    }

    async fn set_project_active(&self, address: &str, active: bool) -> Result<()> {
        let url = format!("{}/projects/{}/active", self.base_url, address);
        debug!("Setting project {} active={}", address, active);

        let response = self
            .request(self.client.put(&url))
            .json(&serde_json::json!({ "active": active }))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to update project: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Honeycomb update error {}: {}", status, body));
        }

        Ok(())
    }
}

/// Cached project list with optimistic toggling
pub struct ProjectRegistry {
    api: std::sync::Arc<dyn ProjectApi>,
    projects: Vec<Project>,
}

impl ProjectRegistry {
    pub fn new(api: std::sync::Arc<dyn ProjectApi>) -> Self {
        Self {
            api,
            projects: Vec::new(),
        }
    }

    /// Re-fetch the project list from the API
    pub async fn refresh(&mut self) -> Result<&[Project]> {
        self.projects = self.api.list_projects().await?;
        info!("Loaded {} Honeycomb projects", self.projects.len());
        Ok(&self.projects)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Flip a project's active flag. The flip is applied locally first and
    /// reverted when the API rejects it; the error propagates to the caller.
    pub async fn toggle(&mut self, address: &str) -> Result<Project> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.address == address)
            .ok_or_else(|| crate::types::HiveError::ProjectNotFound(address.to_string()))?;

        let new_active = !self.projects[idx].is_active;
        self.projects[idx].is_active = new_active;

        match self.api.set_project_active(address, new_active).await {
            Ok(()) => {
                info!("Project {} toggled to active={}", address, new_active);
                Ok(self.projects[idx].clone())
            }
            Err(e) => {
                // Revert the optimistic flip so the UI matches reality
                self.projects[idx].is_active = !new_active;
                warn!("Toggle failed for {}, reverted: {}", address, e);
                Err(e)
            }
        }
    }
}
