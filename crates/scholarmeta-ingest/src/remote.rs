//! Client for the remote PDF extraction service.
//!
//! The service accepts a multipart upload (field `file`) and answers with
//! `{"success": bool, "data": {...}, "message": "..."}`. Any failure here is
//! reported as a [`RemoteError`]; the orchestrator treats all of them alike
//! and falls back to local extraction.

use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use thiserror::Error;

use scholarmeta_core::ExtractedMetadata;

pub const DEFAULT_SERVICE_URL: &str = "http://pdf-service:8000/extract";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("service rejected the document: {0}")]
    Rejected(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

/// Where the service lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Full URL of the extraction endpoint.
    pub url: String,
    /// Applies to the whole request, upload included.
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `GET /health` on the same host as the extraction endpoint.
    pub fn health_url(&self) -> Result<reqwest::Url, RemoteError> {
        reqwest::Url::parse(&self.url)
            .and_then(|url| url.join("/health"))
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {e}", self.url)))
    }
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    success: bool,
    data: Option<ExtractedMetadata>,
    #[serde(default)]
    message: String,
}

/// Blocking client for the extraction service.
pub struct RemoteClient {
    config: RemoteConfig,
    client: Client,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("scholarmeta/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Upload `path` and decode the returned record.
    ///
    /// Exactly one request is made; there is no retry.
    pub fn extract(&self, path: &Path) -> Result<ExtractedMetadata, RemoteError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        let bytes = std::fs::read(path)?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let resp = self.client.post(&self.config.url).multipart(form).send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body: ServiceResponse = resp.json()?;
        if !body.success {
            return Err(RemoteError::Rejected(body.message));
        }
        body.data
            .ok_or_else(|| RemoteError::Rejected("response carried no data".into()))
    }

    /// Whether the service answers its health endpoint with 200.
    pub fn health(&self) -> Result<bool, RemoteError> {
        let url = self.config.health_url()?;
        let resp = self.client.get(url).send()?;
        Ok(resp.status() == StatusCode::OK)
    }
}
