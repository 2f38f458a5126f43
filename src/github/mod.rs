// GitHub API module.
// Provides the client, the retrying fetcher, and the user profile type.

pub mod client;
pub mod endpoints;
pub mod fetcher;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use fetcher::{DEFAULT_MAX_TRIES, FetchOutcome, Fetcher, RetryPolicy};
pub use types::*;
