//! Registry data API HTTP client.
//!
//! Wraps the three read-only endpoints of the data API. Requests are built
//! separately from being sent so the query contract can be checked without
//! a server.

use std::time::Duration;

use reqwest::Request;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::RegionId;

use super::error::ApiError;
use super::registry::{ListQuery, RegistryApi};
use super::types::{ListResponse, SearchResponse};

/// Default origin of the data API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Origin of the data API, without a trailing path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RegistryConfig {
    /// Create a config pointing at the default origin.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the registry data API.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build `GET /api/list?region=..&start=..&limit=..[&year=..]`.
    pub fn list_request(&self, query: &ListQuery) -> Result<Request, ApiError> {
        let mut params = vec![
            ("region", query.region.to_string()),
            ("start", query.start.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(year) = query.year {
            params.push(("year", year.to_string()));
        }

        Ok(self.http.get(self.url("/api/list")).query(&params).build()?)
    }

    /// Build `GET /api/search?q=..&region=..`.
    pub fn search_request(&self, text: &str, region: RegionId) -> Result<Request, ApiError> {
        Ok(self
            .http
            .get(self.url("/api/search"))
            .query(&[("q", text.to_string()), ("region", region.to_string())])
            .build()?)
    }

    /// Build `GET /api/updated`.
    pub fn updated_request(&self) -> Result<Request, ApiError> {
        Ok(self.http.get(self.url("/api/updated")).build()?)
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, request: Request) -> Result<String, ApiError> {
        debug!(url = %request.url(), "registry request");

        let response = self.http.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let body = self.send(request).await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl RegistryApi for RegistryClient {
    async fn fetch_list(&self, query: ListQuery) -> Result<ListResponse, ApiError> {
        let request = self.list_request(&query)?;
        self.get_json(request).await
    }

    async fn search(&self, text: &str, region: RegionId) -> Result<SearchResponse, ApiError> {
        let request = self.search_request(text, region)?;
        self.get_json(request).await
    }

    async fn last_updated(&self) -> Result<String, ApiError> {
        let request = self.updated_request()?;
        self.send(request).await
    }
}
