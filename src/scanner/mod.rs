//! File discovery for batch folder-structure validation.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::Result;

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 2] = [".git", "node_modules"];

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// All files below `root` (or `root` itself when it is a file).
    ///
    /// # Errors
    /// Returns an error if the root cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Recursive walker built on `ignore`, optionally honoring `.gitignore`.
pub struct DirectoryScanner {
    use_gitignore: bool,
}

impl DirectoryScanner {
    #[must_use]
    pub const fn new(use_gitignore: bool) -> Self {
        Self { use_gitignore }
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FileScanner for DirectoryScanner {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        std::fs::metadata(root)?;

        let mut files: Vec<PathBuf> = WalkBuilder::new(root)
            .git_ignore(self.use_gitignore)
            .git_global(self.use_gitignore)
            .git_exclude(self.use_gitignore)
            .ignore(false)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .filter_entry(|entry| {
                !(entry.file_type().is_some_and(|ft| ft.is_dir())
                    && SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip))
            })
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect();
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
