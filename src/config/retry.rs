//! Retry configuration for the mandate pipeline

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Attempt ceiling for mandate submission.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Fixed delay schedule between attempts, in seconds.
///
/// Entry N is the wait before attempt N+2; a fixed schedule, not computed,
/// so tests can assert on it directly.
pub const DEFAULT_BACKOFF_SECS: [u64; 5] = [10, 30, 60, 120, 300];

/// Retry configuration (mandate submission)
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, first attempt included (default 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay schedule in seconds between consecutive attempts
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: Vec<u64>,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_backoff_secs() -> Vec<u64> {
    DEFAULT_BACKOFF_SECS.to_vec()
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

impl RetryConfig {
    /// Delay to wait before the given attempt (2-based; attempt 1 runs
    /// immediately). Overflowing the schedule reuses its last entry.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        debug_assert!(attempt >= 2, "attempt 1 has no preceding delay");
        let index = (attempt.saturating_sub(2)) as usize;
        let secs = self
            .backoff_secs
            .get(index)
            .or_else(|| self.backoff_secs.last())
            .copied()
            .unwrap_or(0);
        Duration::from_secs(secs)
    }

    /// Whether another attempt is allowed after `attempt` attempts ran.
    pub fn attempts_remain_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Validate retry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::ZeroAttempts);
        }
        if (self.backoff_secs.len() as u32) + 1 < self.max_attempts {
            return Err(ValidationError::BackoffScheduleTooShort);
        }
        Ok(())
    }
}
