//! Backoff for catalog API calls.
//!
//! Only the HTTP transport retries, and only errors for which
//! [`CatalogError::is_retryable`] holds. The clone engine itself treats every
//! error it sees as final.

use crate::config::NetworkConfig;
use crate::error::{CatalogError, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// How often, and how patiently, a catalog API call is retried.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, the first one included. Never below 1.
    pub max_attempts: u32,
    /// Wait before the first retry. Doubles for every further retry.
    pub base_delay: Duration,
    /// Upper bound on any single wait, server hints included.
    pub max_delay: Duration,
    /// Spread each wait over 50% to 150% of its nominal length.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: NetworkConfig::MAX_RETRIES,
            base_delay: NetworkConfig::RETRY_BASE_DELAY,
            max_delay: NetworkConfig::RETRY_MAX_DELAY,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single attempt, no retries.
    pub fn disabled() -> Self {
        Self::default().with_max_attempts(1)
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Nominal wait after `failures` consecutive failed attempts, before
    /// jitter: `base_delay * 2^(failures - 1)`, capped at `max_delay`.
    pub fn backoff(&self, failures: u32) -> Duration {
        let doublings = failures.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1 << doublings)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Actual wait before retrying `error`. A `Retry-After` hint from a rate
    /// limited response replaces the computed backoff.
    fn wait_for(&self, failures: u32, error: &CatalogError) -> Duration {
        if let CatalogError::RateLimited {
            retry_after_secs: Some(secs),
            ..
        } = error
        {
            return Duration::from_secs(*secs).min(self.max_delay);
        }

        let nominal = self.backoff(failures);
        if !self.jitter {
            return nominal;
        }
        let factor: f64 = rand::rng().random_range(0.5..1.5);
        nominal.mul_f64(factor).min(self.max_delay)
    }
}

/// Run `call` until it succeeds, fails with an error that is not retryable,
/// or runs out of attempts. `operation` names the API call in log lines.
pub async fn with_retries<F, Fut, T>(config: &RetryConfig, operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut failures = 0;
    loop {
        let error = match call().await {
            Ok(value) => {
                if failures > 0 {
                    debug!("{} succeeded on attempt {}", operation, failures + 1);
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        failures += 1;
        if !error.is_retryable() {
            return Err(error);
        }
        if failures >= config.max_attempts {
            warn!("{} gave up after {} attempts: {}", operation, failures, error);
            return Err(error);
        }

        let wait = config.wait_for(failures, &error);
        warn!(
            "{} failed (attempt {}/{}), retrying in {:?}: {}",
            operation, failures, config.max_attempts, wait, error
        );
        tokio::time::sleep(wait).await;
    }
}
