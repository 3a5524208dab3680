use std::time::Duration;

use heizen_config::RetryConfig;

/// Attempt budget and exponential backoff schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total provider calls allowed, including the first; values below 1 act as 1
    pub max_attempts: u32,
    /// Delay after the first failure
    pub base_delay: Duration,
    /// Cap on any single delay
    pub max_delay: Duration,
    /// Deadline for one provider call
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.base_delay,
            max_delay: config.max_delay,
            attempt_timeout: config.attempt_timeout,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Effective budget, never below one attempt
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after failed attempt `attempt` (1-indexed) before the next one
    ///
    /// `min(base_delay * 2^(attempt - 1), max_delay)`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1 << exponent).min(self.max_delay)
    }
}
