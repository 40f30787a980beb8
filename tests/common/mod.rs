//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use query_gateway::{GatewayConfig, HttpServer, Shutdown};
use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One request as seen by the mock downstream.
#[derive(Debug, Clone)]
pub struct Received {
    pub body: Value,
    pub request_id: Option<String>,
}

/// Handle to a running mock downstream.
pub struct Downstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Received>>>,
}

impl Downstream {
    pub fn url(&self) -> String {
        format!("http://{}/query", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a programmable downstream on an ephemeral port.
///
/// `f` gets the decoded request body (`Value::Null` if it was not JSON) and
/// returns the status code and raw body to answer with.
pub async fn start_downstream<F, Fut>(f: F) -> Downstream
where
    F: Fn(Value) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    serve_downstream(listener, f)
}

/// Start a programmable downstream on a specific address.
pub async fn start_downstream_at<F, Fut>(addr: SocketAddr, f: F) -> Downstream
where
    F: Fn(Value) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    serve_downstream(listener, f)
}

fn serve_downstream<F, Fut>(listener: TcpListener, f: F) -> Downstream
where
    F: Fn(Value) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));

    let (h, r) = (hits.clone(), received.clone());
    let app = Router::new().route(
        "/query",
        post(move |headers: HeaderMap, body: Bytes| {
            let (f, h, r) = (f.clone(), h.clone(), r.clone());
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                r.lock().unwrap().push(Received {
                    body: body.clone(),
                    request_id: headers
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                });

                let (status, body) = f(body).await;
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Downstream { addr, hits, received }
}

/// Downstream that always answers 200 with `body`.
pub async fn start_fixed_downstream(body: &'static str) -> Downstream {
    start_downstream(move |_| async move { (200, body.to_string()) }).await
}

/// An address nothing listens on.
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Default config pointing at `upstream_url`, listening on an ephemeral port.
pub fn gateway_config(upstream_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.url = upstream_url.to_string();
    config
}

/// Running gateway instance. Shuts down when dropped.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn query_url(&self) -> String {
        format!("http://{}/api/query", self.addr)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

/// Start a gateway and hand back the server task so tests can observe
/// when `run` returns.
pub async fn start_gateway_task(
    config: GatewayConfig,
) -> (SocketAddr, Shutdown, JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    (addr, shutdown, task)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
