//! Async Resource Loader
//!
//! Bounded retry with exponential backoff and a per-attempt timeout, used by
//! the repository load path. Collaborator loads are expected to fail only
//! transiently; once the attempt budget is spent the caller decides what the
//! degraded state looks like (the repositories settle on an empty
//! collection).

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

// == Retry Policy ==
/// Attempt budget and pacing for a retried load.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts before giving up (minimum 1)
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry
    pub base_delay: Duration,
    /// Upper bound on a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Default pacing with a custom attempt budget.
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Backoff before the attempt following `attempt` (1-based):
    /// `base_delay * 2^(attempt-1)`.
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

// == Load Error ==
/// The attempt budget was exhausted without a successful load.
#[derive(Debug, Error)]
#[error("{label} failed after {attempts} attempts: {last_error}")]
pub struct LoadError {
    /// Label identifying the resource being loaded
    pub label: String,
    /// Attempts made
    pub attempts: u32,
    /// The final attempt's failure
    pub last_error: String,
}

// == With Retry ==
/// Runs `op` until it succeeds or the policy's attempt budget is spent.
///
/// Each attempt is bounded by `attempt_timeout`; failed attempts log a
/// warning with the label and attempt number, then back off exponentially.
pub async fn with_retry<T, F, Fut>(
    label: &str,
    policy: &RetryPolicy,
    mut op: F,
) -> std::result::Result<T, LoadError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        match tokio::time::timeout(policy.attempt_timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => last_error = err.to_string(),
            Err(_) => {
                last_error = format!("attempt timed out after {:?}", policy.attempt_timeout)
            }
        }

        warn!(
            "{}: attempt {}/{} failed: {}",
            label, attempt, max_attempts, last_error
        );

        if attempt < max_attempts {
            tokio::time::sleep(policy.backoff(attempt)).await;
        }
    }

    Err(LoadError {
        label: label.to_string(),
        attempts: max_attempts,
        last_error,
    })
}
