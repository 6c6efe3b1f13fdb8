//! Filesystem abstraction for testability.
//!
//! Validators only ever ask whether a path exists and read small text files
//! (configs, `tsconfig.json`, the cache). The cache is the only writer.

use std::path::{Path, PathBuf};

#[cfg(test)]
pub(crate) mod mock;

/// Trait for filesystem operations (for testability).
pub trait FileSystem: Send + Sync {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Replace the contents of `path`. Readers never observe a partial write.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Remove a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> std::io::Result<()>;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let file_name = path
            .file_name()
            .map_or_else(|| "layout-guard".into(), |name| name.to_string_lossy());
        let temp_path = path.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, path).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp_path);
        })
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
