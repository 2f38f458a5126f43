//! ghlookup - cached, retrying GitHub user profile lookups.
//!
//! [`Resolver`] is the entry point: it checks a negative cache of users
//! known to be missing, then a cache of profile payloads, and only then
//! asks the GitHub API, retrying transient failures with backoff.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod resolver;

pub use config::Config;
pub use error::{LookupError, Result};
pub use github::UserProfile;
pub use resolver::{Lookup, Resolver};
