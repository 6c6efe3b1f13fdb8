use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pattern::{Pattern, PatternItem};
use crate::reference::ReusablePatterns;

/// Default location of the tsconfig read for path aliases.
pub const DEFAULT_TSCONFIG_PATH: &str = "./tsconfig.json";

/// `baseUrl` + wildcard alias map, as in `compilerOptions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAliases {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub paths: IndexMap<String, Vec<String>>,
}

fn default_base_url() -> String {
    ".".to_string()
}

impl Default for PathAliases {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            paths: IndexMap::new(),
        }
    }
}

/// One logical module boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub name: String,

    /// Files belonging to the module (project-relative globs).
    pub pattern: Pattern,

    #[serde(default)]
    pub allow_imports_from: Vec<PatternItem>,

    /// `Some(false)` forbids external imports not listed in `allowImportsFrom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_external_imports: Option<bool>,

    /// Replaces the default violation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndependentModulesConfig {
    #[serde(default = "super::model::default_root")]
    pub project_root: PathBuf,

    /// Read when `pathAliases` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_aliases: Option<PathAliases>,

    /// Extra extensions probed after the built-in list.
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub reusable_import_patterns: ReusablePatterns,

    pub modules: Vec<ModuleDescriptor>,

    #[serde(default)]
    pub debug_mode: bool,
}

/// The subset of `tsconfig.json` used for aliases.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TsConfig {
    #[serde(default)]
    pub compiler_options: TsCompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TsCompilerOptions {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub paths: Option<IndexMap<String, Vec<String>>>,
}

impl From<TsConfig> for PathAliases {
    fn from(tsconfig: TsConfig) -> Self {
        let options = tsconfig.compiler_options;
        Self {
            base_url: options.base_url.unwrap_or_else(default_base_url),
            paths: options.paths.unwrap_or_default(),
        }
    }
}
