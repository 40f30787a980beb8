//! Request handlers.
//!
//! `POST /api/query` runs a strictly linear pipeline per request:
//! decode → forward → decode → encode. Nothing survives the request.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use std::time::Instant;

use crate::http::error::GatewayError;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::query::{QueryRequest, QueryResponse};

/// Forward a query to the downstream service and relay its answer.
pub async fn handle_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<QueryResponse>, GatewayError> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = forward(&state, request_id, body).await;
    match &result {
        Ok(_) => metrics::record_query("ok", start),
        Err(e) => {
            match e {
                GatewayError::BadRequest(_) | GatewayError::PayloadTooLarge(_) => {
                    tracing::warn!(request_id = ?request_id, error = %e, "Rejected query request")
                }
                _ => tracing::error!(
                    request_id = ?request_id,
                    upstream = %state.upstream.url(),
                    error = %e,
                    "Query failed"
                ),
            }
            metrics::record_query(e.outcome(), start);
        }
    }
    result.map(Json)
}

async fn forward(
    state: &AppState,
    request_id: Option<&str>,
    body: Result<Bytes, BytesRejection>,
) -> Result<QueryResponse, GatewayError> {
    let body = body?;
    let request: QueryRequest = serde_json::from_slice(&body)?;

    tracing::debug!(request_id = ?request_id, top_k = request.top_k, "Forwarding query");

    let response = state.upstream.query(&request, request_id).await?;
    Ok(response)
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
