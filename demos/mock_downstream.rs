//! Stand-in downstream query service for local runs.
//!
//! Listens on 127.0.0.1:5555 and answers `POST /query` by echoing the query
//! with `top_k` placeholder results.

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

use query_gateway::QueryRequest;

async fn query(Json(req): Json<QueryRequest>) -> Json<Value> {
    let results: Vec<Value> = (0..req.top_k.max(0))
        .map(|i| {
            json!({
                "paragraph": format!("result {}", i + 1),
                "score": 1.0 - i as f64 / 10.0,
                "book": "demo",
            })
        })
        .collect();

    Json(json!({
        "query": req.query,
        "anthropic_response": format!("You asked: {}", req.query),
        "raw_results": results,
    }))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let app = Router::new()
        .route("/query", post(query))
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 5555));
    println!("Mock downstream listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
