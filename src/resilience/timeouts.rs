//! Timeout enforcement for the outbound call.
//!
//! # Responsibilities
//! - Translate configured timeouts into the HTTP client's deadlines
//! - Leave deadlines unset when not configured
//!
//! # Design Decisions
//! - Uses reqwest's connect and total-request timeouts
//! - Timeout errors surface as transport failures (UpstreamUnavailable)

use std::time::Duration;

use crate::config::UpstreamConfig;

/// Outbound deadlines. `None` means wait indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    pub connect: Option<Duration>,
    pub request: Option<Duration>,
}

impl UpstreamTimeouts {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            connect: config.connect_timeout_secs.map(Duration::from_secs),
            request: config.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Apply the configured deadlines to a client builder.
    pub fn apply(&self, mut builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        if let Some(connect) = self.connect {
            builder = builder.connect_timeout(connect);
        }
        if let Some(request) = self.request {
            builder = builder.timeout(request);
        }
        builder
    }
}
