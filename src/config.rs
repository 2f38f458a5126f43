// Lookup configuration.
// Cache location, freshness windows, retry ceiling, and API credentials.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{self, DEFAULT_MAX_AGE};
use crate::error::{LookupError, Result};
use crate::github::{DEFAULT_MAX_TRIES, GITHUB_API_BASE};

pub const ENV_CACHE_DIR: &str = "GHLOOKUP_CACHE_DIR";
pub const ENV_MAX_AGE_DAYS: &str = "GHLOOKUP_MAX_AGE_DAYS";
pub const ENV_NEGATIVE_MAX_AGE_DAYS: &str = "GHLOOKUP_NEGATIVE_MAX_AGE_DAYS";
pub const ENV_MAX_TRIES: &str = "GHLOOKUP_MAX_TRIES";
pub const ENV_API_BASE: &str = "GHLOOKUP_API_BASE";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for cache entries.
    pub cache_dir: PathBuf,
    /// Freshness window for cached profiles.
    pub max_age: Duration,
    /// Freshness window for not-found markers.
    pub negative_max_age: Duration,
    /// Attempt ceiling for one lookup.
    pub max_tries: u32,
    /// Optional GitHub token.
    pub token: Option<String>,
    /// API root, overridable for testing against a local server.
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: cache::default_cache_dir()
                .unwrap_or_else(|| PathBuf::from(".ghlookup-cache")),
            max_age: DEFAULT_MAX_AGE,
            negative_max_age: DEFAULT_MAX_AGE,
            max_tries: DEFAULT_MAX_TRIES,
            token: None,
            api_base: GITHUB_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_CACHE_DIR) {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(days) = get(ENV_MAX_AGE_DAYS) {
            config.max_age = days_from_str(ENV_MAX_AGE_DAYS, &days)?;
        }
        if let Some(days) = get(ENV_NEGATIVE_MAX_AGE_DAYS) {
            config.negative_max_age = days_from_str(ENV_NEGATIVE_MAX_AGE_DAYS, &days)?;
        }
        if let Some(tries) = get(ENV_MAX_TRIES) {
            config.max_tries = tries.trim().parse().map_err(|_| {
                LookupError::Config(format!(
                    "{} must be an integer, got {:?}",
                    ENV_MAX_TRIES, tries
                ))
            })?;
        }
        if let Some(base) = get(ENV_API_BASE) {
            config.api_base = base;
        }
        config.token = get(ENV_TOKEN);

        config.validate()?;
        Ok(config)
    }

    /// Reject settings under which no lookup could ever succeed.
    pub fn validate(&self) -> Result<()> {
        if self.max_tries < 2 {
            return Err(LookupError::Config(format!(
                "max tries must be at least 2, got {}",
                self.max_tries
            )));
        }
        Ok(())
    }
}

/// Convert a whole number of days to a duration.
pub fn days(days: u64) -> Duration {
    Duration::from_secs(days.saturating_mul(SECS_PER_DAY))
}

fn days_from_str(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(days)
        .map_err(|_| {
            LookupError::Config(format!(
                "{} must be a whole number of days, got {:?}",
                key, value
            ))
        })
}
