//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream URL
//! - Validate value ranges (timeouts > 0, attempts >= 1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid upstream url '{value}': {reason}")]
    InvalidUpstreamUrl { value: String, reason: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("retries.base_delay_ms ({base}) exceeds retries.max_delay_ms ({max})")]
    BackoffRange { base: u64, max: u64 },

    #[error("unknown log format '{0}' (expected 'pretty' or 'json')")]
    LogFormat(String),
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_addr(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::Zero { field: "listener.max_body_bytes" });
    }

    match url::Url::parse(&config.upstream.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUpstreamUrl {
            value: config.upstream.url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
            value: config.upstream.url.clone(),
            reason: e.to_string(),
        }),
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "upstream.connect_timeout_secs" });
    }
    if config.upstream.request_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "upstream.request_timeout_secs" });
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::Zero { field: "retries.max_attempts" });
    }
    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::BackoffRange {
            base: config.retries.base_delay_ms,
            max: config.retries.max_delay_ms,
        });
    }

    let observability = &config.observability;
    if !matches!(observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::LogFormat(observability.log_format.clone()));
    }
    if observability.metrics_enabled {
        check_addr(&mut errors, "observability.metrics_address", &observability.metrics_address);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.url = "ftp://localhost/query".into();
        config.upstream.request_timeout_secs = Some(0);
        config.retries.max_attempts = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero { field: "retries.max_attempts" }));
        assert!(errors.contains(&ValidationError::Zero { field: "upstream.request_timeout_secs" }));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let mut config = GatewayConfig::default();
        config.upstream.url = "localhost:5555/query".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidUpstreamUrl { .. }));
    }

    #[test]
    fn test_backoff_range_and_log_format() {
        let mut config = GatewayConfig::default();
        config.retries.base_delay_ms = 5000;
        config.retries.max_delay_ms = 100;
        config.observability.log_format = "xml".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BackoffRange { base: 5000, max: 100 },
                ValidationError::LogFormat("xml".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
