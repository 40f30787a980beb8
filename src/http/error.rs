//! Gateway error type and its HTTP rendering.
//!
//! Every failure is terminal for the request and renders as
//! `{"error": "<message>"}`. Client errors expose their detail; upstream
//! failures are reduced to a fixed message.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Error calling query service";
pub const BAD_UPSTREAM_RESPONSE_MESSAGE: &str = "Error parsing query service response";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Inbound body is not a well-formed QueryRequest.
    #[error("{0}")]
    BadRequest(String),

    /// Inbound body exceeds the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Outbound call failed at the transport level.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    /// Downstream body is not a well-formed QueryResponse.
    #[error("bad upstream response: {0}")]
    BadUpstreamResponse(#[source] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::UpstreamUnavailable(_) | GatewayError::BadUpstreamResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "bad_request",
            GatewayError::PayloadTooLarge(_) => "payload_too_large",
            GatewayError::UpstreamUnavailable(_) => "upstream_unavailable",
            GatewayError::BadUpstreamResponse(_) => "bad_upstream_response",
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::BadRequest(msg) | GatewayError::PayloadTooLarge(msg) => msg.clone(),
            GatewayError::UpstreamUnavailable(_) => UPSTREAM_UNAVAILABLE_MESSAGE.to_string(),
            GatewayError::BadUpstreamResponse(_) => BAD_UPSTREAM_RESPONSE_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::BadRequest(err.to_string())
    }
}

impl From<BytesRejection> for GatewayError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge(rejection.body_text())
        } else {
            GatewayError::BadRequest(rejection.body_text())
        }
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(e) => GatewayError::UpstreamUnavailable(e),
            UpstreamError::Decode(e) => GatewayError::BadUpstreamResponse(e),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryResponse;
    use axum::body::to_bytes;

    async fn render(err: GatewayError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_exposes_detail() {
        let err: GatewayError = serde_json::from_str::<crate::query::QueryRequest>("{}")
            .unwrap_err()
            .into();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("missing field `query`"));
    }

    #[tokio::test]
    async fn test_bad_upstream_response_hides_detail() {
        let decode = serde_json::from_str::<QueryResponse>("<html>").unwrap_err();
        let err = GatewayError::from(UpstreamError::Decode(decode));
        assert_eq!(err.outcome(), "bad_upstream_response");

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": BAD_UPSTREAM_RESPONSE_MESSAGE}));
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_unavailable() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let transport = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap()
            .get(format!("http://{}/query", addr))
            .send()
            .await
            .unwrap_err();

        let err = GatewayError::from(UpstreamError::Transport(transport));
        assert_eq!(err.outcome(), "upstream_unavailable");
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": UPSTREAM_UNAVAILABLE_MESSAGE}));
    }

    #[tokio::test]
    async fn test_payload_too_large_status() {
        let (status, body) = render(GatewayError::PayloadTooLarge("too big".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "too big");
    }
}
