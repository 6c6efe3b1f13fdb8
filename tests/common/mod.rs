#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the layout-guard binary.
#[macro_export]
macro_rules! layout_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("layout-guard"))
    };
}

/// A temporary project directory.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, including parent folders.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates several empty files.
    pub fn touch_all(&self, relative_paths: &[&str]) {
        for path in relative_paths {
            self.create_file(path, "");
        }
    }

    /// Writes `value` as pretty JSON.
    pub fn create_json(&self, relative_path: &str, value: &serde_json::Value) {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize JSON");
        self.create_file(relative_path, &content);
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.join(relative_path)).expect("Failed to read file")
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.join(relative_path).exists()
    }

    pub fn remove(&self, relative_path: &str) {
        fs::remove_file(self.join(relative_path)).expect("Failed to remove file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }
}
