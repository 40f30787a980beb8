//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the query gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Downstream query service.
    pub upstream: UpstreamConfig,

    /// Retry configuration for the outbound call.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,

    /// Seconds in-flight requests may keep running after shutdown starts.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            shutdown_grace_secs: 30,
        }
    }
}

/// Downstream query service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL queries are POSTed to.
    pub url: String,

    /// Connection establishment timeout in seconds. Unset means no limit.
    pub connect_timeout_secs: Option<u64>,

    /// Total time allowed for the outbound call in seconds. Unset means the
    /// handler waits as long as the downstream keeps the connection open.
    pub request_timeout_secs: Option<u64>,

    /// Honor HTTP_PROXY / HTTPS_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5555/query".to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            use_system_proxy: false,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_endpoints() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.url, "http://localhost:5555/query");
        assert!(config.upstream.request_timeout_secs.is_none());
        assert!(!config.retries.enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            request_timeout_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.request_timeout_secs, Some(15));
        assert_eq!(config.upstream.url, "http://localhost:5555/query");
        assert_eq!(config.listener.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.retries.max_attempts, 3);
        assert_eq!(config.observability.metrics_address, "0.0.0.0:9090");
    }
}
