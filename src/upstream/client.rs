//! HTTP client for the downstream query service.
//!
//! # Responsibilities
//! - POST the query as JSON to the configured URL
//! - Read the full response body and decode it as a QueryResponse
//! - Apply configured timeouts and connection-failure retries
//!
//! # Design Decisions
//! - The downstream status code is not inspected; the body decides success
//! - Transport errors and decode errors stay distinct so the handler can
//!   report them separately

use axum::body::Bytes;
use thiserror::Error;

use crate::config::{GatewayConfig, UpstreamConfig};
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::query::{QueryRequest, QueryResponse};
use crate::resilience::{RetryPolicy, UpstreamTimeouts};

/// Failures of the outbound call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The call could not be completed (connect, timeout, body read).
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The downstream answered with a body that is not a QueryResponse.
    #[error("upstream response did not decode: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client bound to one downstream URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl UpstreamClient {
    /// Build the client. Fails only if the TLS backend cannot be initialized.
    pub fn new(config: &UpstreamConfig, retry: RetryPolicy) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = UpstreamTimeouts::from_config(config)
            .apply(builder)
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            retry,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.upstream, RetryPolicy::from_config(&config.retries))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward `request` and decode the downstream answer.
    pub async fn query(
        &self,
        request: &QueryRequest,
        request_id: Option<&str>,
    ) -> Result<QueryResponse, UpstreamError> {
        let body = self.send(request, request_id).await?;
        serde_json::from_slice(&body).map_err(UpstreamError::Decode)
    }

    async fn send(
        &self,
        request: &QueryRequest,
        request_id: Option<&str>,
    ) -> Result<Bytes, UpstreamError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send_once(request, request_id).await {
                Ok(body) => {
                    metrics::record_upstream_attempt(true);
                    return Ok(body);
                }
                Err(e) => {
                    metrics::record_upstream_attempt(false);
                    match self.retry.next_delay(attempt, e.is_connect()) {
                        Some(delay) => {
                            tracing::info!(
                                request_id = ?request_id,
                                attempt,
                                delay = ?delay,
                                error = %e,
                                "Retrying upstream after connection failure"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(UpstreamError::Transport(e)),
                    }
                }
            }
        }
    }

    async fn send_once(
        &self,
        request: &QueryRequest,
        request_id: Option<&str>,
    ) -> Result<Bytes, reqwest::Error> {
        let mut builder = self
            .http
            .post(&self.url)
            .json(request);
        if let Some(id) = request_id {
            builder = builder.header(X_REQUEST_ID, id);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                request_id = ?request_id,
                status = %status,
                "Upstream answered with non-success status"
            );
        }
        response.bytes().await
    }
}
