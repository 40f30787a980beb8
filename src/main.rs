//! Query gateway.
//!
//! Accepts `POST /api/query`, forwards the JSON body to the downstream query
//! service and relays its JSON answer.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                 QUERY GATEWAY                │
//!   Client Request    │  ┌─────────┐    ┌──────────┐    ┌──────────┐ │
//!   ──────────────────┼─▶│  http   │───▶│ handler  │───▶│ upstream │─┼──▶ Downstream
//!                     │  │ server  │    │ (decode) │    │  client  │ │    query service
//!   Client Response   │  └─────────┘    └──────────┘    └────┬─────┘ │
//!   ◀─────────────────┼──────────── encode / error ◀─────────┘       │
//!                     │                                              │
//!                     │  config · observability · resilience ·       │
//!                     │  lifecycle                                   │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use query_gateway::lifecycle::{self, signals, Overrides, Shutdown, StartupError};
use query_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "query-gateway")]
#[command(about = "HTTP gateway forwarding JSON queries to a downstream service", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.url.
    #[arg(long)]
    upstream_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();

    let config = lifecycle::prepare_config(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            upstream_url: cli.upstream_url,
        },
    )?;

    logging::init_logging(&config.observability);
    tracing::info!("query-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    lifecycle::start(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
