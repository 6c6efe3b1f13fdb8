use std::path::PathBuf;

use thiserror::Error;

/// Configuration-class failures.
///
/// Every variant means the policy itself cannot be evaluated, so callers abort
/// the run instead of reporting a per-file diagnostic. Validation outcomes
/// (bad names, forbidden imports, ...) are plain values, never errors.
#[derive(Error, Debug)]
pub enum LayoutGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Regex: {regex} is invalid")]
    InvalidRegex {
        regex: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "Reference {} in '{key}' do not exist. Allowed references = {}.",
        references.join(", "),
        allowed.join(", ")
    )]
    InvalidReference {
        references: Vec<String>,
        key: String,
        allowed: Vec<String>,
    },

    #[error("ruleId: '{0}' does not exist in object 'rules'")]
    UnknownRuleId(String),

    #[error("Infinite recursion for: {0}")]
    RecursionLimitExceeded(String),

    #[error("'folderRecursionLimit' cannot exceed {limit} (rule '{rule_id}' declares {declared})")]
    FolderRecursionLimitTooLarge {
        rule_id: String,
        declared: usize,
        limit: usize,
    },

    #[error("The '{0}' key does not exist in the reusableImportPatterns object")]
    UnknownReusablePattern(String),

    #[error(
        "You want to use {{{key}}} as part of '{pattern}' pattern, but {{{key}}} contains more than one pattern"
    )]
    ReferenceAsPartOfPattern { key: String, pattern: String },

    #[error(
        "You want to use {{{key}}} in the {patterns} pattern, but {{{key}}} has nested arrays within it"
    )]
    NestedArrayInPattern { key: String, patterns: String },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl LayoutGuardError {
    /// Short machine-readable name of the error variant.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::InvalidRegex { .. } => "InvalidRegex",
            Self::InvalidReference { .. } => "InvalidReference",
            Self::UnknownRuleId(_) => "UnknownRuleId",
            Self::RecursionLimitExceeded(_) => "RecursionLimitExceeded",
            Self::FolderRecursionLimitTooLarge { .. } => "FolderRecursionLimitTooLarge",
            Self::UnknownReusablePattern(_) => "UnknownReusablePattern",
            Self::ReferenceAsPartOfPattern { .. } => "ReferenceAsPartOfPattern",
            Self::NestedArrayInPattern { .. } => "NestedArrayInPattern",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::FileAccess { .. } => "FileAccess",
            Self::Io(_) => "Io",
            Self::JsonParse(_) => "JsonParse",
            Self::YamlParse(_) => "YamlParse",
            Self::TomlParse(_) => "TomlParse",
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
