//! HTTP client for the dashboard backend

use super::{DebugSource, FetchError};
use crate::models::{
    DebugPayload, EventRecord, ImageRecord, PodDetails, PodHealth, ResourceKind, ResourceTarget,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Client for the `/api/...` endpoints of the dashboard backend
#[derive(Debug, Clone)]
pub struct HttpDashboardClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpDashboardClient {
    /// Create a client for a backend base URL (e.g. `http://localhost:8080`)
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(endpoint).map_err(|e| FetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: endpoint.to_string(),
                source: e,
            })?;

        tracing::debug!("Created dashboard client for: {}", base);

        Ok(Self { client, base })
    }

    /// Build `<base>/api/<segments...>` with every segment percent-encoded
    pub fn api_url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidEndpoint {
                    endpoint: self.base.to_string(),
                    reason: "URL cannot be used as a base".to_string(),
                })?;
            path.pop_if_empty().push("api").extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!("Fetching data from: {}", url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            let detail = backend_error_message(&body)
                .map(|message| format!(": {}", message))
                .unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        let data = serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            origin: url.to_string(),
            source: e,
        })?;

        tracing::debug!("Successfully fetched data from: {}", url);

        Ok(data)
    }

    /// `GET /api/namespaces`
    pub async fn namespaces(&self) -> Result<Vec<String>, FetchError> {
        self.get_json(self.api_url(&["namespaces"])?).await
    }

    /// `GET /api/health/{ns}`
    pub async fn health(&self, namespace: &str) -> Result<Vec<PodHealth>, FetchError> {
        self.get_json(self.api_url(&["health", namespace])?).await
    }

    /// `GET /api/images/{ns}`
    pub async fn images(&self, namespace: &str) -> Result<Vec<ImageRecord>, FetchError> {
        self.get_json(self.api_url(&["images", namespace])?).await
    }

    /// `GET /api/images` (every namespace)
    pub async fn all_images(&self) -> Result<Vec<ImageRecord>, FetchError> {
        self.get_json(self.api_url(&["images"])?).await
    }

    /// `GET /api/events/{ns}`
    pub async fn events(&self, namespace: &str) -> Result<Vec<EventRecord>, FetchError> {
        self.get_json(self.api_url(&["events", namespace])?).await
    }

    /// `GET /api/pods/{ns}/{name}`
    pub async fn pod(&self, namespace: &str, name: &str) -> Result<PodDetails, FetchError> {
        self.get_json(self.api_url(&["pods", namespace, name])?).await
    }

    /// `GET /api/{configmaps|secrets|services|ingresses|pods}/{ns}`
    ///
    /// These lists have no fixed shape; rows are returned as raw JSON.
    pub async fn resource_list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<serde_json::Value>, FetchError> {
        let collection = collection_path(kind).ok_or_else(|| {
            FetchError::NotFound(format!("no list endpoint for {}", kind.display_name()))
        })?;
        self.get_json(self.api_url(&[collection, namespace])?).await
    }

    /// `GET /api/debug/{type}/{ns}/{name}`
    pub async fn debug(
        &self,
        namespace: &str,
        target: &ResourceTarget,
    ) -> Result<DebugPayload, FetchError> {
        let url = self.api_url(&["debug", target.kind.as_str(), namespace, &target.name])?;
        self.get_json(url).await
    }
}

#[async_trait]
impl DebugSource for HttpDashboardClient {
    async fn fetch_debug(
        &self,
        namespace: &str,
        target: &ResourceTarget,
    ) -> Result<DebugPayload, FetchError> {
        self.debug(namespace, target).await
    }

    fn source_type(&self) -> &str {
        "http"
    }
}

fn collection_path(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Pod => Some("pods"),
        ResourceKind::Service => Some("services"),
        ResourceKind::Ingress => Some("ingresses"),
        ResourceKind::ConfigMap => Some("configmaps"),
        ResourceKind::Secret => Some("secrets"),
        ResourceKind::Current => None,
    }
}

/// Extract `{"error": "..."}` from an error body
fn backend_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

/// Parse duration string (e.g., "30s", "1m", "5s")
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    use anyhow::Context;

    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.parse().context("Invalid duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().context("Invalid duration")?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow::anyhow!("Duration too large: {}", s))?;
        Ok(Duration::from_secs(secs))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.parse().context("Invalid duration")?;
        let secs = hours
            .checked_mul(3600)
            .ok_or_else(|| anyhow::anyhow!("Duration too large: {}", s))?;
        Ok(Duration::from_secs(secs))
    } else {
        anyhow::bail!("Invalid duration format: {}", s)
    }
}
