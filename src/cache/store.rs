// Cache store for reading and writing raw cache entries.
// Freshness is judged from the file's modification time; payloads are opaque bytes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::error::{LookupError, Result};

use super::paths::{EntryKind, user_path};

/// Default freshness window for both profile and not-found entries: 30 days.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Check whether an entry modified at `modified` is still within `max_age` of `now`.
///
/// Timestamps in the future (clock skew) count as fresh.
pub fn is_fresh(modified: SystemTime, max_age: Duration, now: SystemTime) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age <= max_age,
        Err(_) => true,
    }
}

/// Read an entry if it exists and is younger than `max_age`.
///
/// A missing or expired entry is `Ok(None)`; the file is left in place either way.
pub fn read_if_fresh(path: &Path, max_age: Duration) -> Result<Option<Vec<u8>>> {
    let modified = match modified_at(path) {
        Ok(modified) => modified,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LookupError::storage(path, e)),
    };

    if !is_fresh(modified, max_age, SystemTime::now()) {
        debug!(path = %path.display(), "cache entry expired");
        return Ok(None);
    }

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LookupError::storage(path, e)),
    }
}

/// Write an entry, creating parent directories and replacing any previous content.
pub fn write_entry(path: &Path, payload: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LookupError::storage(parent, e))?;
    }

    // Write via a sibling temp file so readers never see a half-written entry
    let temp_path = temp_path_for(path);
    let write = || -> io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(payload)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    };
    write().map_err(|e| LookupError::storage(path, e))
}

/// Get the modification time of a cache file.
pub fn modified_at(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// File-backed store rooted at a configured cache directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of a user's entry of the given kind.
    pub fn path(&self, username: &str, kind: EntryKind) -> PathBuf {
        user_path(&self.root, username, kind)
    }

    /// Read a user's entry if present and fresh.
    pub fn read(
        &self,
        username: &str,
        kind: EntryKind,
        max_age: Duration,
    ) -> Result<Option<Vec<u8>>> {
        read_if_fresh(&self.path(username, kind), max_age)
    }

    /// Store a user's entry.
    pub fn write(&self, username: &str, kind: EntryKind, payload: &[u8]) -> Result<()> {
        let path = self.path(username, kind);
        write_entry(&path, payload)?;
        debug!(path = %path.display(), bytes = payload.len(), "cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    /// Backdate a file's modification time.
    fn age_file(path: &Path, age: Duration) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn test_is_fresh_boundaries() {
        let now = SystemTime::now();
        let max_age = Duration::from_secs(60);

        assert!(is_fresh(now - Duration::from_secs(59), max_age, now));
        assert!(is_fresh(now - max_age, max_age, now));
        assert!(!is_fresh(now - Duration::from_secs(61), max_age, now));
        assert!(is_fresh(now + Duration::from_secs(5), max_age, now));
    }

    #[test]
    fn test_write_and_read_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dirs/alice.json");

        write_entry(&path, b"{\"login\":\"alice\"}").unwrap();

        let read = read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap();
        assert_eq!(read.as_deref(), Some(&b"{\"login\":\"alice\"}"[..]));
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap().is_none());
    }

    #[test]
    fn test_expired_entry_is_ignored_and_left_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("old.json");

        write_entry(&path, b"stale").unwrap();
        age_file(&path, 31 * DAY);
        let before = modified_at(&path).unwrap();

        assert!(read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap().is_none());

        assert_eq!(fs::read(&path).unwrap(), b"stale");
        assert_eq!(modified_at(&path).unwrap(), before);
    }

    #[test]
    fn test_entry_within_window_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recent.json");

        write_entry(&path, b"recent").unwrap();
        age_file(&path, 29 * DAY);

        assert_eq!(
            read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap().as_deref(),
            Some(&b"recent"[..])
        );
    }

    #[test]
    fn test_read_does_not_touch_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bob.json");

        write_entry(&path, b"bob").unwrap();
        age_file(&path, 5 * DAY);
        let before = modified_at(&path).unwrap();

        read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap();
        read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap();

        assert_eq!(modified_at(&path).unwrap(), before);
    }

    #[test]
    fn test_write_replaces_expired_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("carol.json");

        write_entry(&path, b"old").unwrap();
        age_file(&path, 40 * DAY);
        write_entry(&path, b"new").unwrap();

        assert_eq!(
            read_if_fresh(&path, DEFAULT_MAX_AGE).unwrap().as_deref(),
            Some(&b"new"[..])
        );
    }

    #[test]
    fn test_storage_errors_are_surfaced() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("users/alice.json");

        let err = write_entry(&path, b"x").unwrap_err();
        assert!(matches!(err, LookupError::Storage { .. }));

        let err = read_if_fresh(&blocker.join("alice.json"), DEFAULT_MAX_AGE).unwrap_err();
        assert!(matches!(err, LookupError::Storage { .. }));
    }

    #[test]
    fn test_store_namespaces_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        store.write("alice", EntryKind::Profile, b"profile").unwrap();

        assert!(
            store
                .read("alice", EntryKind::NotFound, DEFAULT_MAX_AGE)
                .unwrap()
                .is_none()
        );
        assert_eq!(
            store
                .read("alice", EntryKind::Profile, DEFAULT_MAX_AGE)
                .unwrap()
                .as_deref(),
            Some(&b"profile"[..])
        );
    }
}
