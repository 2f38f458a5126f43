// Error types for ghlookup.
// Separates cache storage faults, HTTP failures, and bad upstream payloads.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Cache storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GitHub API error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Maximum number of retries reached ({attempts}), user: {username}")]
    RetriesExhausted { username: String, attempts: u32 },

    #[error("Error decoding GitHub data for user {username}: {source}")]
    Decode {
        username: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Got bad JSON from GitHub: {payload}")]
    InvalidProfile { payload: String },

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LookupError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
