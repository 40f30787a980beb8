//! Retry logic for the outbound query call.
//!
//! # Responsibilities
//! - Decide whether a failed attempt may be repeated
//! - Compute the delay before the next attempt
//!
//! # Design Decisions
//! - Disabled unless configured; a disabled policy allows exactly one attempt
//! - Only connection failures are retried: the POST never reached the
//!   downstream, so it is still delivered at most once
//! - Jittered backoff prevents thundering herd

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Upper bound of the random stretch applied to each delay.
const JITTER: f64 = 0.1;

/// Retry decision rules derived from [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        let max_attempts = if config.enabled {
            config.max_attempts.max(1)
        } else {
            1
        };

        Self {
            max_attempts,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the next attempt, or `None` when attempt number `attempt`
    /// (1-based, just failed) must be the last one.
    pub fn next_delay(&self, attempt: u32, connect_failure: bool) -> Option<Duration> {
        if !connect_failure || attempt >= self.max_attempts {
            return None;
        }
        let delay = self.delay_before(attempt + 1);
        Some(delay.mul_f64(1.0 + rand::thread_rng().gen_range(0.0..JITTER)))
    }

    /// Un-jittered delay ahead of attempt `next` (the second attempt waits
    /// `base_delay_ms`, each later one twice as long, up to `max_delay_ms`).
    fn delay_before(&self, next: u32) -> Duration {
        let doublings = next.saturating_sub(2);
        let ms = 1u64
            .checked_shl(doublings)
            .and_then(|factor| self.base_delay_ms.checked_mul(factor))
            .map_or(self.max_delay_ms, |ms| ms.min(self.max_delay_ms));
        Duration::from_millis(ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            enabled: true,
            max_attempts,
            base_delay_ms: 10,
            max_delay_ms: 100,
        }
    }

    #[test]
    fn test_disabled_policy_allows_one_attempt() {
        let policy = RetryPolicy::from_config(&RetryConfig::default());
        assert_eq!(policy.max_attempts(), 1);
        assert!(policy.next_delay(1, true).is_none());
    }

    #[test]
    fn test_retries_connect_failures_until_budget() {
        let policy = RetryPolicy::from_config(&enabled(3));
        assert!(policy.next_delay(1, true).is_some());
        assert!(policy.next_delay(2, true).is_some());
        assert!(policy.next_delay(3, true).is_none());
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let policy = RetryPolicy::from_config(&enabled(10));
        assert_eq!(policy.delay_before(2), Duration::from_millis(10));
        assert_eq!(policy.delay_before(3), Duration::from_millis(20));
        assert_eq!(policy.delay_before(5), Duration::from_millis(80));
        assert_eq!(policy.delay_before(6), Duration::from_millis(100));
        assert_eq!(policy.delay_before(200), Duration::from_millis(100));
    }

    #[test]
    fn test_jitter_stays_within_ten_percent() {
        let policy = RetryPolicy::from_config(&enabled(10));
        for _ in 0..50 {
            let delay = policy.next_delay(2, true).unwrap();
            assert!(delay >= Duration::from_millis(20) && delay < Duration::from_millis(22));
        }
    }

    #[test]
    fn test_never_retries_after_request_was_sent() {
        let policy = RetryPolicy::from_config(&enabled(5));
        assert!(policy.next_delay(1, false).is_none());
    }
}
