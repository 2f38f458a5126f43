// Cache path utilities.
// Maps a username and entry kind to a deterministic file under the cache root.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Kind of cache entry stored for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Serialized profile payload.
    Profile,
    /// Empty marker for a user GitHub reported as missing.
    NotFound,
}

impl EntryKind {
    /// File extension used for this namespace.
    pub fn suffix(&self) -> &'static str {
        match self {
            EntryKind::Profile => "json",
            EntryKind::NotFound => "notfound",
        }
    }
}

/// Get the default cache directory (~/.cache/ghlookup on Linux).
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ghlookup").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding all per-user entries.
pub fn users_dir(root: &Path) -> PathBuf {
    root.join("users")
}

/// Path to a user's entry of the given kind.
pub fn user_path(root: &Path, username: &str, kind: EntryKind) -> PathBuf {
    users_dir(root).join(format!("{}.{}", encode_name(username), kind.suffix()))
}

/// Encode a name for use as a file name.
/// Percent-encoding keeps distinct names distinct and removes path separators.
fn encode_name(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}
