// Cache module for local filesystem caching.
// Stores GitHub user payloads and not-found markers keyed by username.

pub mod negative;
pub mod paths;
pub mod store;

pub use negative::NegativeCache;
pub use paths::{EntryKind, default_cache_dir, user_path};
pub use store::{CacheStore, DEFAULT_MAX_AGE, read_if_fresh, write_entry};
