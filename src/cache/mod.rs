//! Folder-structure error cache.
//!
//! Each distinct error message is recorded against the first file that
//! produced it, so an error shared by many files (a folder missing an
//! enforced entry, for example) is reported once.
//!
//! Cache format (`projectStructure.cache.json`, under the project root):
//! ```json
//! [
//!   { "filename": "/repo/src/bad/a.ts", "errorMessage": "🔥 Folder 'bad' ..." }
//! ]
//! ```
//!
//! There is no locking: concurrent writers are last-writer-wins. Callers
//! run the cache pass sequentially.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filesystem::FileSystem;
use crate::{LayoutGuardError, Result};

pub const CACHE_FILE_NAME: &str = "projectStructure.cache.json";

/// One reported error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub filename: String,
    pub error_message: String,
}

impl CacheRecord {
    #[must_use]
    pub fn new(filename: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            error_message: error_message.into(),
        }
    }
}

/// Persistent record list.
pub trait CacheStore {
    /// Stored records, or `None` when nothing is stored.
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be read.
    fn read(&self) -> Result<Option<Vec<CacheRecord>>>;

    /// Replace the stored records.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    fn write(&self, records: &[CacheRecord]) -> Result<()>;

    /// Drop the store entirely.
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be removed.
    fn remove(&self) -> Result<()>;
}

/// [`CacheStore`] backed by a pretty-printed JSON file.
pub struct JsonCacheFile<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> JsonCacheFile<'a> {
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, path: PathBuf) -> Self {
        Self { fs, path }
    }

    /// The cache file under `project_root`.
    #[must_use]
    pub fn in_project(fs: &'a dyn FileSystem, project_root: &Path) -> Self {
        Self::new(fs, project_root.join(CACHE_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonCacheFile<'_> {
    fn read(&self) -> Result<Option<Vec<CacheRecord>>> {
        let content = match self.fs.read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LayoutGuardError::FileAccess {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => Ok(Some(records)),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "discarding unreadable cache");
                Ok(None)
            }
        }
    }

    fn write(&self, records: &[CacheRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.fs
            .write(&self.path, &json)
            .map_err(|source| LayoutGuardError::FileAccess {
                path: self.path.clone(),
                source,
            })
    }

    fn remove(&self) -> Result<()> {
        match self.fs.remove_file(&self.path) {
            Err(error) if error.kind() != ErrorKind::NotFound => {
                Err(LayoutGuardError::FileAccess {
                    path: self.path.clone(),
                    source: error,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Cache decisions on top of a [`CacheStore`].
pub struct ErrorCache<'a, S: CacheStore> {
    store: S,
    fs: &'a dyn FileSystem,
}

impl<'a, S: CacheStore> ErrorCache<'a, S> {
    /// `fs` answers whether recorded files still exist.
    #[must_use]
    pub fn new(store: S, fs: &'a dyn FileSystem) -> Self {
        Self { store, fs }
    }

    fn prune_missing(&self, records: Vec<CacheRecord>) -> Vec<CacheRecord> {
        records
            .into_iter()
            .filter(|record| self.fs.exists(Path::new(&record.filename)))
            .collect()
    }

    /// Forget `filename` after it validated cleanly. Records of deleted files
    /// are dropped as well; an empty cache is removed.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn record_success(&self, filename: &str) -> Result<()> {
        let Some(records) = self.store.read()? else {
            return Ok(());
        };
        let before = records.len();
        let kept: Vec<CacheRecord> = self
            .prune_missing(records)
            .into_iter()
            .filter(|record| record.filename != filename)
            .collect();

        if kept.is_empty() {
            tracing::debug!(filename, "cache emptied, removing");
            return self.store.remove();
        }
        if kept.len() != before {
            self.store.write(&kept)?;
        }
        Ok(())
    }

    /// Record a violation and decide whether to report it.
    ///
    /// Returns `false` when the same message is already recorded against a
    /// different, still existing file and `still_failing` confirms that file
    /// still produces it. Otherwise the record moves to `filename` and the
    /// violation is reported.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written, or what
    /// `still_failing` returns.
    pub fn record_violation<R>(
        &self,
        filename: &str,
        message: &str,
        still_failing: R,
    ) -> Result<bool>
    where
        R: FnOnce(&str) -> Result<bool>,
    {
        let record = CacheRecord::new(filename, message);
        let Some(records) = self.store.read()? else {
            self.store.write(std::slice::from_ref(&record))?;
            return Ok(true);
        };

        let mut records = self.prune_missing(records);
        if let Some(index) = records.iter().position(|r| r.error_message == message) {
            let recorded_for = records[index].filename.clone();
            if recorded_for == filename {
                tracing::debug!(filename, "violation already cached for this file");
                return Ok(true);
            }
            if still_failing(&recorded_for)? {
                tracing::debug!(filename, %recorded_for, "violation already cached");
                return Ok(false);
            }
            tracing::debug!(filename, moved_from = %recorded_for, "cached violation moved");
            records.remove(index);
        }

        let mut updated = Vec::with_capacity(records.len() + 1);
        updated.push(record);
        updated.extend(records);
        self.store.write(&updated)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
