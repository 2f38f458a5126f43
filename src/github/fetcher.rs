// Retrying fetcher for GitHub user profiles.
// Drives single attempts with exponential backoff until a terminal outcome.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{LookupError, Result};

use super::client::GitHubClient;

/// Default attempt ceiling for one user lookup.
pub const DEFAULT_MAX_TRIES: u32 = 10;

/// Result of one network attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response with the raw body.
    Success(Vec<u8>),
    /// 404: the user definitely does not exist.
    NotFound,
    /// Transport error or unexpected status; worth retrying.
    Transient(String),
    /// Attempt ceiling reached.
    Exhausted,
}

/// Exponential backoff bounded by an attempt ceiling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempt counter value at which the lookup gives up.
    pub max_tries: u32,
    /// Delay after the first transient failure.
    pub initial_backoff: Duration,
    /// Growth factor applied to the delay after each failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            initial_backoff: Duration::from_millis(500),
            multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_tries(max_tries: u32) -> Self {
        Self {
            max_tries,
            ..Self::default()
        }
    }

    /// Delay to wait after the `failures`-th consecutive transient failure (1-based).
    pub fn backoff(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_backoff.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Fetches user profiles, retrying transient failures.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: GitHubClient,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: GitHubClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetch a user's raw profile JSON.
    ///
    /// Returns `Ok(None)` when GitHub answers 404. The attempt counter is
    /// bumped before every request and the lookup fails once it reaches
    /// `max_tries`, so at most `max_tries - 1` requests are sent.
    pub async fn fetch(&self, username: &str) -> Result<Option<Vec<u8>>> {
        info!(username, "Fetching data for github user");

        let mut tries = 0u32;
        loop {
            tries += 1;
            let outcome = if tries >= self.policy.max_tries {
                FetchOutcome::Exhausted
            } else {
                self.client.try_get_user(username).await?
            };

            match outcome {
                FetchOutcome::Success(payload) => return Ok(Some(payload)),
                FetchOutcome::NotFound => return Ok(None),
                FetchOutcome::Exhausted => {
                    return Err(LookupError::RetriesExhausted {
                        username: username.to_string(),
                        attempts: self.policy.max_tries,
                    });
                }
                FetchOutcome::Transient(detail) => {
                    warn!(attempt = tries, "{}", detail);
                    // No point sleeping when the next pass only reports exhaustion
                    if tries + 1 < self.policy.max_tries {
                        sleep(self.policy.backoff(tries)).await;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_exponentially() {
        let policy = RetryPolicy {
            max_tries: 10,
            initial_backoff: Duration::from_millis(100),
            multiplier: 2.0,
        };

        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(5), Duration::from_millis(1600));
    }

    #[test]
    fn test_backoff_saturates_instead_of_overflowing() {
        let policy = RetryPolicy {
            max_tries: u32::MAX,
            initial_backoff: Duration::from_secs(1),
            multiplier: 10.0,
        };

        assert_eq!(policy.backoff(1_000), Duration::MAX);
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_tries, DEFAULT_MAX_TRIES);
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(750));
    }
}
