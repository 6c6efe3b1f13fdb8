use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::FileSystem;

/// In-memory filesystem. Directories are implied by the files below them.
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    dirs: Mutex<HashSet<PathBuf>>,
    current_dir: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            dirs: Mutex::new(HashSet::new()),
            current_dir: PathBuf::from("/project"),
        }
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(normalize_path(path.as_ref()), content.to_string());
        self
    }

    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.dirs
            .lock()
            .unwrap()
            .insert(normalize_path(path.as_ref()));
        self
    }

    pub fn with_current_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_dir = path.into();
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&normalize_path(path.as_ref()))
            .cloned()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.contents(path)
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        self.files.lock().unwrap().contains_key(&normalized) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        self.dirs
            .lock()
            .unwrap()
            .iter()
            .any(|dir| dir.starts_with(&normalized))
            || self
                .files
                .lock()
                .unwrap()
                .keys()
                .any(|file| file != &normalized && file.starts_with(&normalized))
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(normalize_path(path), contents.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(&normalize_path(path))
            .map(|_| ())
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }
}

pub fn normalize_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let mut components = Vec::new();
    for part in path_str.split('/') {
        match part {
            ".." => {
                components.pop();
            }
            "." | "" => {}
            _ => components.push(part),
        }
    }
    let normalized = if path_str.starts_with('/') {
        format!("/{}", components.join("/"))
    } else {
        components.join("/")
    };
    PathBuf::from(normalized)
}
