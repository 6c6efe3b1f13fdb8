use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;
use crate::reference::RegexParameters;

/// Default maximum path length for [`LongPathsInfo`].
pub const DEFAULT_MAX_PATH_LENGTH: usize = 240;

/// A value that may be written as a single item or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        Self::One(item)
    }
}

pub(crate) fn default_root() -> PathBuf {
    PathBuf::from(".")
}

// ============================================================================
// Folder structure
// ============================================================================

/// One allowed file or folder.
///
/// A rule with `children` describes a folder, one without describes a file.
/// `ruleId` pulls the remaining fields from [`FolderStructureConfig::rules`];
/// fields set here override the referenced ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Rule>>,

    /// Names that must exist next to (file) or inside (folder) the matched node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_existence: Option<OneOrMany<String>>,

    /// Unroll self-references of this rule at most this many levels deep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_recursion_limit: Option<usize>,
}

impl Rule {
    /// A file rule.
    #[must_use]
    pub fn file(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// A folder rule.
    #[must_use]
    pub fn folder(name: &str, children: Vec<Self>) -> Self {
        Self {
            name: Some(name.to_string()),
            children: Some(children),
            ..Self::default()
        }
    }

    /// A bare reference to a registered rule.
    #[must_use]
    pub fn reference(rule_id: &str) -> Self {
        Self {
            rule_id: Some(rule_id.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.children.is_some()
    }

    /// Fields of `self` layered over `base`.
    #[must_use]
    pub fn overlay(&self, base: &Self) -> Self {
        Self {
            rule_id: self.rule_id.clone().or_else(|| base.rule_id.clone()),
            name: self.name.clone().or_else(|| base.name.clone()),
            children: self.children.clone().or_else(|| base.children.clone()),
            enforce_existence: self
                .enforce_existence
                .clone()
                .or_else(|| base.enforce_existence.clone()),
            folder_recursion_limit: self.folder_recursion_limit.or(base.folder_recursion_limit),
        }
    }
}

/// Named rules referenced through [`Rule::rule_id`].
pub type RuleRegistry = IndexMap<String, Rule>;

/// The top of the structure: one root rule, or the children of an implicit
/// root named after the structure root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Structure {
    Children(Vec<Rule>),
    Root(Box<Rule>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongPathMode {
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongPathsInfo {
    #[serde(default = "default_max_path_length")]
    pub max_length: usize,

    /// Measure from `projectRoot.join(root)`.
    #[serde(default = "default_long_path_root")]
    pub root: String,

    /// Measure the absolute path instead.
    #[serde(default)]
    pub count_from_system_root: bool,

    #[serde(default)]
    pub mode: LongPathMode,
}

const fn default_max_path_length() -> usize {
    DEFAULT_MAX_PATH_LENGTH
}

fn default_long_path_root() -> String {
    "..".to_string()
}

impl Default for LongPathsInfo {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_PATH_LENGTH,
            root: default_long_path_root(),
            count_from_system_root: false,
            mode: LongPathMode::Warn,
        }
    }
}

/// `longPathsInfo`: `false` disables the check, `true` or an object enables it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LongPathsSetting {
    Toggle(bool),
    Info(LongPathsInfo),
}

impl Default for LongPathsSetting {
    fn default() -> Self {
        Self::Info(LongPathsInfo::default())
    }
}

impl LongPathsSetting {
    /// Effective settings, or `None` when disabled.
    #[must_use]
    pub fn info(&self) -> Option<LongPathsInfo> {
        match self {
            Self::Toggle(false) => None,
            Self::Toggle(true) => Some(LongPathsInfo::default()),
            Self::Info(info) => Some(info.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderStructureConfig {
    #[serde(default = "default_root")]
    pub project_root: PathBuf,

    /// Relative to `projectRoot`. Prefixes every reported error location.
    #[serde(default = "default_root")]
    pub structure_root: PathBuf,

    /// Paths (relative to the structure root) that are never validated.
    #[serde(default)]
    pub ignore_patterns: Pattern,

    #[serde(default)]
    pub long_paths_info: LongPathsSetting,

    pub structure: Structure,

    #[serde(default)]
    pub rules: RuleRegistry,

    #[serde(default)]
    pub regex_parameters: RegexParameters,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
