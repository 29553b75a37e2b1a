//! Retry policy for page fetches
//!
//! Every failure is retried the same way regardless of its cause. The default
//! policy makes three attempts with a fixed 60 second wait between them.

use crate::config::{BackoffKind, FetchConfig};
use std::time::Duration;

/// How long to wait before the next attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Constant wait before every retry
    Fixed(Duration),

    /// `base * 2^(n-1)` before retry `n`, capped at `max`
    Exponential { base: Duration, max: Duration },
}

/// Attempt budget plus wait strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Fixed(Duration::from_secs(60)),
        }
    }
}

impl RetryPolicy {
    /// Builds the policy described by the `[fetch]` config section
    pub fn from_config(config: &FetchConfig) -> Self {
        let base = Duration::from_secs(config.retry_wait_secs);
        let backoff = match config.backoff {
            BackoffKind::Fixed => Backoff::Fixed(base),
            BackoffKind::Exponential => Backoff::Exponential {
                base,
                max: Duration::from_secs(config.max_wait_secs),
            },
        };

        Self {
            max_attempts: config.max_attempts.max(1),
            backoff,
        }
    }

    /// Wait to apply after `failed_attempt` (1-based) has failed
    ///
    /// Returns `None` once the attempt budget is spent.
    pub fn delay_before_retry(&self, failed_attempt: u32) -> Option<Duration> {
        if failed_attempt >= self.max_attempts {
            return None;
        }

        let delay = match self.backoff {
            Backoff::Fixed(wait) => wait,
            Backoff::Exponential { base, max } => {
                let factor = 1u32.checked_shl(failed_attempt.saturating_sub(1)).unwrap_or(u32::MAX);
                base.checked_mul(factor).unwrap_or(max).min(max)
            }
        };

        Some(delay)
    }
}
