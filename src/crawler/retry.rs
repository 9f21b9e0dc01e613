//! Bounded fixed-delay retry policy
//!
//! The source endpoint drops requests transiently under load, so the
//! controller retries the same offset after a fixed delay. The attempt cap
//! turns a persistently failing endpoint into a failed run instead of an
//! infinite loop.

use crate::config::RetryConfig;
use std::time::Duration;

/// Retry parameters for transport faults
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per offset before the run fails
    pub max_attempts: u32,

    /// Fixed delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_secs(config.delay_secs))
    }

    /// Returns true if another attempt is allowed after `attempts` failures
    pub fn allows_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let policy = RetryPolicy::from_config(&RetryConfig {
            max_attempts: 3,
            delay_secs: 5,
        });
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[test]
    fn test_allows_retry_up_to_cap() {
        let policy = RetryPolicy::new(3, Duration::from_secs(5));
        assert!(policy.allows_retry(1));
        assert!(policy.allows_retry(2));
        assert!(!policy.allows_retry(3));
        assert!(!policy.allows_retry(4));
    }
}
