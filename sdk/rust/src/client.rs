use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub top_k: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub anthropic_response: String,
    pub raw_results: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request to gateway failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway answered with a non-success status and an `{"error": ...}` body.
    #[error("gateway returned {status}: {message}")]
    Gateway { status: StatusCode, message: String },

    #[error("unexpected gateway response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(Client::new(), gateway_url)
    }

    pub fn with_client(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a query through the gateway.
    pub async fn query(&self, query: &str, top_k: i64) -> Result<QueryResponse, SdkError> {
        let req = QueryRequest {
            query: query.to_string(),
            top_k,
        };
        let resp = self
            .client
            .post(format!("{}/api/query", self.gateway_url))
            .json(&req)
            .send()
            .await?;

        decode(resp).await
    }

    /// Check gateway liveness.
    pub async fn health(&self) -> Result<bool, SdkError> {
        let resp = self
            .client
            .get(format!("{}/health", self.gateway_url))
            .send()
            .await?;

        let body: serde_json::Value = decode(resp).await?;
        Ok(body["status"] == "healthy")
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> Result<T, SdkError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(SdkError::Gateway { status, message });
    }

    Ok(serde_json::from_str(&text)?)
}
