//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler and upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every handler log line
//! - Metrics are cheap when no exporter is installed

pub mod logging;
pub mod metrics;
