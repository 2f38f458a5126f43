// Negative cache for users GitHub reported as missing.
// Presence of a fresh marker is the whole signal; marker content is ignored.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;

use super::paths::EntryKind;
use super::store::CacheStore;

/// Records confirmed-absent usernames so they are not looked up again
/// until the marker ages out.
#[derive(Debug, Clone)]
pub struct NegativeCache {
    store: CacheStore,
    max_age: Duration,
}

impl NegativeCache {
    pub fn new(store: CacheStore, max_age: Duration) -> Self {
        Self { store, max_age }
    }

    /// Check whether `username` has a fresh not-found marker.
    pub fn contains(&self, username: &str) -> Result<bool> {
        let hit = self
            .store
            .read(username, EntryKind::NotFound, self.max_age)?
            .is_some();
        if hit {
            debug!(username, "negative cache hit");
        }
        Ok(hit)
    }

    /// Write a not-found marker for `username`.
    pub fn record(&self, username: &str) -> Result<()> {
        self.store.write(username, EntryKind::NotFound, &[])
    }
}
