//! Retry policy with exponential backoff and jitter.
//!
//! Transport-level retry only: the policy re-issues requests that failed at
//! the connection layer or came back with a retryable status. API-level
//! outcomes (envelope errors, not-found) are never retried.

use rand::Rng;
use std::time::Duration;

/// Configuration for transport-level retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each attempt.
    pub factor: f64,
    /// Whether to add random jitter on top of the computed delay.
    pub jitter: bool,
    /// Cap for delays taken from a Retry-After header.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            factor: 2.0,
            jitter: true,
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Disable jitter, making delays deterministic.
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }
}

/// Retry state for a single logical request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Returns the current attempt number (0-indexed).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record an attempt and return the delay before the next retry.
    /// Returns `None` once all attempts are used up.
    ///
    /// A `Retry-After` value from the server takes precedence over the
    /// computed backoff, capped at `max_retry_after`.
    pub fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if self.attempt >= self.config.max_attempts {
            return None;
        }

        let delay = match retry_after {
            Some(server_delay) => std::cmp::min(server_delay, self.config.max_retry_after),
            None => self.backoff_delay(),
        };

        self.attempt += 1;
        Some(delay)
    }

    fn backoff_delay(&self) -> Duration {
        let multiplier = self.config.factor.powi(self.attempt as i32);
        let mut delay = self.config.initial_delay.as_secs_f64() * multiplier;

        if self.config.jitter {
            delay += rand::rng().random::<f64>() * delay;
        }

        std::cmp::min(Duration::from_secs_f64(delay), self.config.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(500));
        assert!(config.jitter);
    }

    #[test]
    fn test_exponential_backoff_without_jitter() {
        let config = RetryConfig::default()
            .with_initial_delay(Duration::from_secs(1))
            .without_jitter();
        let mut policy = RetryPolicy::new(config);

        assert_eq!(policy.next_delay(None), Some(Duration::from_secs(1)));
        assert_eq!(policy.next_delay(None), Some(Duration::from_secs(2)));
        assert_eq!(policy.next_delay(None), Some(Duration::from_secs(4)));
        assert_eq!(policy.next_delay(None), None);
    }

    #[test]
    fn test_delay_capped_at_max() {
        let config = RetryConfig::default()
            .with_max_attempts(10)
            .with_initial_delay(Duration::from_secs(10))
            .with_max_delay(Duration::from_secs(15))
            .without_jitter();
        let mut policy = RetryPolicy::new(config);

        policy.next_delay(None);
        assert_eq!(policy.next_delay(None), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_jitter_stays_within_double() {
        let config = RetryConfig::default().with_initial_delay(Duration::from_secs(1));
        let mut policy = RetryPolicy::new(config);

        let delay = policy.next_delay(None).unwrap();
        assert!(delay >= Duration::from_secs(1));
        assert!(delay <= Duration::from_secs(2));
    }

    #[test]
    fn test_retry_after_takes_precedence_and_is_capped() {
        let mut policy = RetryPolicy::new(RetryConfig::default());

        let delay = policy.next_delay(Some(Duration::from_secs(30))).unwrap();
        assert_eq!(delay, Duration::from_secs(30));

        let delay = policy.next_delay(Some(Duration::from_secs(120))).unwrap();
        assert_eq!(delay, Duration::from_secs(60));
    }

    #[test]
    fn test_attempt_counter() {
        let mut policy = RetryPolicy::new(RetryConfig::default().with_max_attempts(2));
        assert_eq!(policy.attempt(), 0);
        policy.next_delay(None);
        assert_eq!(policy.attempt(), 1);
        policy.next_delay(None);
        assert_eq!(policy.attempt(), 2);
        assert!(policy.next_delay(None).is_none());
    }
}
