//! HTTP document fetcher.
//!
//! One GET per candidate, at most one attempt — a transient failure is
//! treated identically to a permanent one and the candidate is dropped from
//! the run. A non-200 status or a content type that does not indicate a PDF
//! yields a per-document error, never a pipeline-fatal one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use shortlist_core::{defaults, DocumentFetcher, Error, Result};

/// Fetches candidate PDFs over HTTP.
pub struct HttpDocumentFetcher {
    client: Client,
}

impl HttpDocumentFetcher {
    /// Create a fetcher with the default per-request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(defaults::FETCH_TIMEOUT_SECS)
    }

    /// Create a fetcher with a custom per-request timeout (seconds).
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Create from environment variables (`FETCH_TIMEOUT_SECS`).
    pub fn from_env() -> Result<Self> {
        let timeout_secs = std::env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::FETCH_TIMEOUT_SECS);
        Self::with_timeout(timeout_secs)
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Fetch failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Request(format!(
                "Document fetch returned {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("pdf") {
            return Err(Error::Request(format!(
                "Unexpected content type: {}",
                if content_type.is_empty() {
                    "(none)"
                } else {
                    content_type.as_str()
                }
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Request(format!("Failed to read body: {}", e)))?;

        debug!(document_url = url, size = bytes.len(), "Fetched document");
        Ok(bytes.to_vec())
    }
}
