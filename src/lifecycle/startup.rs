//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and apply command-line overrides
//! - Initialize subsystems in dependency order
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{read_config, validate_config, ConfigError, GatewayConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build upstream client: {0}")]
    UpstreamClient(#[from] reqwest::Error),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub upstream_url: Option<String>,
}

/// Read the config file (or defaults), apply overrides, then validate.
pub fn prepare_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<GatewayConfig, ConfigError> {
    let mut config = read_config(path)?;

    if let Some(bind_address) = overrides.bind_address {
        config.listener.bind_address = bind_address;
    }
    if let Some(url) = overrides.upstream_url {
        config.upstream.url = url;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Bring the gateway up and serve until `shutdown` is triggered.
pub async fn start(config: GatewayConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        connect_timeout_secs = ?config.upstream.connect_timeout_secs,
        request_timeout_secs = ?config.upstream.request_timeout_secs,
        retries_enabled = config.retries.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
