// User lookup resolution.
// Negative cache, then profile cache, then the network, writing back only fresh data.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{CacheStore, EntryKind, NegativeCache};
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::github::{Fetcher, GitHubClient, RetryPolicy, UserProfile};

/// Outcome of resolving one username. Errors travel separately in `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(UserProfile),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            Lookup::Found(profile) => Some(profile),
            Lookup::NotFound => None,
        }
    }
}

/// Resolves usernames to validated profiles through the two-tier cache.
#[derive(Debug, Clone)]
pub struct Resolver {
    store: CacheStore,
    negative: NegativeCache,
    fetcher: Fetcher,
    max_age: Duration,
}

impl Resolver {
    pub fn new(
        store: CacheStore,
        fetcher: Fetcher,
        max_age: Duration,
        negative_max_age: Duration,
    ) -> Self {
        Self {
            negative: NegativeCache::new(store.clone(), negative_max_age),
            store,
            fetcher,
            max_age,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = GitHubClient::with_base_url(&config.api_base, config.token.as_deref())?;
        let fetcher = Fetcher::new(client, RetryPolicy::with_max_tries(config.max_tries));
        Ok(Self::new(
            CacheStore::new(&config.cache_dir),
            fetcher,
            config.max_age,
            config.negative_max_age,
        ))
    }

    /// Resolve one username.
    ///
    /// A user known to be missing, or reported missing by GitHub, is
    /// `Lookup::NotFound`. Storage faults, exhausted retries, and malformed
    /// payloads are errors.
    pub async fn resolve(&self, username: &str) -> Result<Lookup> {
        if self.negative.contains(username)? {
            return Ok(Lookup::NotFound);
        }

        if let Some(payload) = self.store.read(username, EntryKind::Profile, self.max_age)? {
            match decode_profile(username, &payload) {
                Ok(profile) => {
                    debug!(username, "profile cache hit");
                    return Ok(Lookup::Found(profile));
                }
                // A torn or corrupted entry is refetched rather than trusted
                Err(e) => warn!(username, error = %e, "ignoring unreadable cached profile"),
            }
        }

        let Some(payload) = self.fetcher.fetch(username).await? else {
            self.negative.record(username)?;
            return Ok(Lookup::NotFound);
        };

        let profile = decode_profile(username, &payload)?;
        self.store.write(username, EntryKind::Profile, &payload)?;
        Ok(Lookup::Found(profile))
    }

    /// Resolve usernames one after another, keeping only those that exist.
    ///
    /// Stops at the first error.
    pub async fn resolve_all<I, S>(&self, usernames: I) -> Result<Vec<UserProfile>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profiles = Vec::new();
        for username in usernames {
            let username = username.as_ref();
            match self.resolve(username).await? {
                Lookup::Found(profile) => profiles.push(profile),
                Lookup::NotFound => info!(username, "skipping unknown GitHub user"),
            }
        }
        Ok(profiles)
    }
}

/// Decode a raw payload and reject bodies that carry no login.
pub fn decode_profile(username: &str, payload: &[u8]) -> Result<UserProfile> {
    let profile: UserProfile =
        serde_json::from_slice(payload).map_err(|source| LookupError::Decode {
            username: username.to_string(),
            source,
        })?;

    if !profile.is_valid() {
        return Err(LookupError::InvalidProfile {
            payload: String::from_utf8_lossy(payload).into_owned(),
        });
    }
    Ok(profile)
}
