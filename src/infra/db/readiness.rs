//! Startup readiness probing.
//!
//! Containers for the service and its database often start together, so the
//! first connection attempts can fail while the database is still booting.
//! [`wait_for_ready`] retries a trivial round trip under a [`RetryPolicy`]
//! before the schema is touched.

use std::time::Duration;

use async_trait::async_trait;

use super::HealthCheck;
use crate::config::ReadinessSettings;
use crate::errors::StartupError;

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Same delay after every failed attempt.
    #[default]
    Fixed,
    /// Delay multiplied by `factor` after each failed attempt, capped at `max_delay`.
    Exponential { factor: u32, max_delay: Duration },
}

/// Bounded retry policy for the startup probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Base delay between attempts.
    pub delay: Duration,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Fixed-delay policy.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Fixed,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Attempts actually made; a policy always tries at least once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential { factor, max_delay } => {
                let multiplier = factor.saturating_pow(attempt.saturating_sub(1));
                self.delay.saturating_mul(multiplier).min(max_delay)
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        ReadinessSettings::default().into()
    }
}

impl From<ReadinessSettings> for RetryPolicy {
    fn from(settings: ReadinessSettings) -> Self {
        Self::new(settings.max_attempts, settings.delay)
    }
}

/// Async sleep, injectable so the retry loop runs without real time in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Ping the store until it answers or the policy is exhausted.
///
/// Returns the number of attempts it took. On exhaustion the error carries the
/// attempt count and the last driver error.
pub async fn wait_for_ready(
    target: &dyn HealthCheck,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<u32, StartupError> {
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match target.ping().await {
            Ok(()) => {
                tracing::info!(attempt, "Connected to database");
                return Ok(attempt);
            }
            Err(e) if attempt >= attempts => {
                tracing::error!(attempt, error = %e, "Database still unavailable, giving up");
                return Err(StartupError::Unavailable {
                    attempts: attempt,
                    source: e,
                });
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    "Database unavailable (attempt {}/{}), retrying in {}ms: {}",
                    attempt,
                    attempts,
                    delay.as_millis(),
                    e
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
