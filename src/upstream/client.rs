//! HTTP client for the upstream REST API.
//!
//! # Responsibilities
//! - Build the project request with bearer authentication
//! - Drain the response body, keeping whatever arrived before a failure
//! - Log failures instead of surfacing them to the caller

use std::time::Duration;

use axum::body::Bytes;

use crate::config::DeploymentConfig;
use crate::upstream::types::{UpstreamError, UpstreamResult};

/// Outbound client used by the dispatcher.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> UpstreamResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gitlabber/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self { client, timeout })
    }

    /// Per-request deadline for upstream calls.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the configured project and return the raw response body.
    ///
    /// Never fails: send errors yield an empty body, read errors yield the
    /// bytes received so far. Non-success statuses are relayed as-is.
    pub async fn fetch_project(&self, config: &DeploymentConfig) -> Bytes {
        let url = config.project_url();

        let response = match self
            .client
            .get(&url)
            .bearer_auth(&config.token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let err = UpstreamError::Request(e);
                tracing::error!(url = %url, error = %err, "Upstream request failed");
                return Bytes::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Upstream returned non-success status");
        }

        let (body, err) = drain(response).await;
        match err {
            Some(err) => tracing::error!(
                url = %url,
                bytes_read = body.len(),
                error = %err,
                "Upstream response body truncated"
            ),
            None => tracing::debug!(url = %url, status = %status, bytes = body.len(), "Upstream responded"),
        }

        body
    }
}

/// Read the body to the end, or up to the first read error.
///
/// The response is consumed, so its connection is released on every path.
async fn drain(mut response: reqwest::Response) -> (Bytes, Option<UpstreamError>) {
    let mut buf = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            Ok(None) => return (Bytes::from(buf), None),
            Err(e) => return (Bytes::from(buf), Some(UpstreamError::Body(e))),
        }
    }
}
