use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{LayoutGuardError, Result};
use crate::filesystem::{FileSystem, RealFileSystem};
use crate::path_utils::normalize;

use super::composition::FileCompositionConfig;
use super::model::FolderStructureConfig;
use super::modules::{DEFAULT_TSCONFIG_PATH, IndependentModulesConfig, PathAliases, TsConfig};

/// Supported config file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Format for `path`, or `None` for an unknown extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// # Errors
    /// Returns the parser's error when `content` is not valid for this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }
}

/// A config record whose relative paths are anchored at the config file.
pub trait LoadableConfig: DeserializeOwned {
    /// Make `projectRoot` absolute, relative to `base_dir`.
    fn anchor(&mut self, base_dir: &Path);

    /// Follow-up reads after parsing (for example `tsconfig.json`).
    ///
    /// # Errors
    /// Implementations may fail on unreadable referenced files.
    fn complete<F: FileSystem>(&mut self, _fs: &F) -> Result<()> {
        Ok(())
    }
}

fn anchor_root(root: &mut PathBuf, base_dir: &Path) {
    if root.is_relative() {
        *root = normalize(&base_dir.join(&*root));
    }
}

impl LoadableConfig for FolderStructureConfig {
    fn anchor(&mut self, base_dir: &Path) {
        anchor_root(&mut self.project_root, base_dir);
    }
}

impl LoadableConfig for FileCompositionConfig {
    fn anchor(&mut self, base_dir: &Path) {
        anchor_root(&mut self.project_root, base_dir);
    }
}

impl LoadableConfig for IndependentModulesConfig {
    fn anchor(&mut self, base_dir: &Path) {
        anchor_root(&mut self.project_root, base_dir);
    }

    fn complete<F: FileSystem>(&mut self, fs: &F) -> Result<()> {
        if self.path_aliases.is_none() {
            self.path_aliases = read_tsconfig_aliases(fs, &self.project_root, self.tsconfig_path.as_deref());
        }
        Ok(())
    }
}

/// Aliases from `compilerOptions`, or `None` when the tsconfig is missing or
/// unreadable.
fn read_tsconfig_aliases<F: FileSystem>(
    fs: &F,
    project_root: &Path,
    tsconfig_path: Option<&Path>,
) -> Option<PathAliases> {
    let path = project_root.join(tsconfig_path.unwrap_or_else(|| Path::new(DEFAULT_TSCONFIG_PATH)));
    let content = match fs.read_to_string(&path) {
        Ok(content) => content,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "no tsconfig, path aliases unset");
            return None;
        }
    };
    match serde_json::from_str::<TsConfig>(&content) {
        Ok(tsconfig) => Some(tsconfig.into()),
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "unreadable tsconfig, path aliases unset");
            None
        }
    }
}

/// Trait for loading configuration records.
pub trait ConfigLoader {
    /// Load and anchor a config record from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path<T: LoadableConfig>(&self, path: &Path) -> Result<T>;
}

/// Loads configuration files through a [`FileSystem`].
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(normalize(path));
        }
        Ok(normalize(&self.fs.current_dir()?.join(path)))
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load_from_path<T: LoadableConfig>(&self, path: &Path) -> Result<T> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            LayoutGuardError::Config(format!(
                "unsupported config format '{}' (expected .json, .yaml, .yml or .toml)",
                path.display()
            ))
        })?;

        let absolute = self.absolute(path)?;
        let content = self
            .fs
            .read_to_string(&absolute)
            .map_err(|source| LayoutGuardError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config: T = format.parse(&content)?;
        let base_dir = absolute.parent().unwrap_or_else(|| Path::new("/"));
        config.anchor(base_dir);
        config.complete(&self.fs)?;
        tracing::debug!(path = %absolute.display(), ?format, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
