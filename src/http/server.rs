//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown, up to the grace deadline

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handler::{handle_query, health};
use crate::http::request::MakeRequestUuidV4;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the query gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::from_config(&config)?;
        let state = AppState {
            upstream: Arc::new(upstream),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id());

        Router::new()
            .route("/api/query", post(handle_query))
            .route("/health", get(health))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(middleware)
    }

    /// Router with all layers applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    ///
    /// In-flight requests get `listener.shutdown_grace_secs` to finish; after
    /// that `run` returns without waiting for them.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.url,
            "HTTP server starting"
        );

        let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
        let (draining_tx, draining_rx) = oneshot::channel::<()>();

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!(grace = ?grace, "Shutdown signal received, draining connections");
                let _ = draining_tx.send(());
            })
            .into_future();

        let deadline = async move {
            match draining_rx.await {
                Ok(()) => tokio::time::sleep(grace).await,
                Err(_) => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = serve => result?,
            _ = deadline => {
                tracing::warn!(grace = ?grace, "Drain deadline passed, abandoning in-flight requests");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
