use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use shared::{
    domain::Assessment,
    protocol::{AnalyzeRequest, AnalyzeResponse},
};

use crate::error::ExchangeError;

/// Seam between the session engine and the remote counterpart-detection
/// service. One `analyze` call per operator submission; `fetch_report`
/// backs the fire-and-forget evidence export.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Assessment, ExchangeError>;
    async fn fetch_report(&self) -> Result<Vec<u8>, ExchangeError>;
}

pub struct MissingAnalysisBackend;

#[async_trait]
impl AnalysisBackend for MissingAnalysisBackend {
    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Assessment, ExchangeError> {
        Err(ExchangeError::Unavailable)
    }

    async fn fetch_report(&self) -> Result<Vec<u8>, ExchangeError> {
        Err(ExchangeError::Unavailable)
    }
}

pub struct HttpAnalysisBackend {
    http: Client,
    base_url: String,
}

impl HttpAnalysisBackend {
    /// The timeout covers the whole request so a hung endpoint resolves to
    /// a transport failure instead of stalling the session.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(request_timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Assessment, ExchangeError> {
        let response = self
            .http
            .post(format!("{}/api/analyze", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status));
        }

        let body = response.text().await?;
        let parsed: AnalyzeResponse = serde_json::from_str(&body)
            .map_err(|err| ExchangeError::Malformed(err.to_string()))?;
        Ok(parsed.into())
    }

    async fn fetch_report(&self) -> Result<Vec<u8>, ExchangeError> {
        let response = self
            .http
            .get(format!("{}/api/export_report", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
