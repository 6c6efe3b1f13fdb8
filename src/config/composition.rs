use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::model::OneOrMany;
use crate::pattern::Pattern;
use crate::reference::RegexParameters;

/// Declaration categories a selector rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectorKind {
    Class,
    Variable,
    VariableExpression,
    PropertyDefinition,
    ArrowFunction,
    Function,
    Type,
    Interface,
    Enum,
}

impl SelectorKind {
    pub const ALL: [Self; 9] = [
        Self::Class,
        Self::Variable,
        Self::VariableExpression,
        Self::PropertyDefinition,
        Self::ArrowFunction,
        Self::Function,
        Self::Type,
        Self::Interface,
        Self::Enum,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Variable => "variable",
            Self::VariableExpression => "variableExpression",
            Self::PropertyDefinition => "propertyDefinition",
            Self::ArrowFunction => "arrowFunction",
            Self::Function => "function",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `variableExpression` narrowed to initializers whose callee/tag matches `limitTo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionSelector {
    #[serde(rename = "type")]
    pub kind: SelectorKind,
    pub limit_to: OneOrMany<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    Kind(SelectorKind),
    Expression(ExpressionSelector),
}

impl From<SelectorKind> for Selector {
    fn from(kind: SelectorKind) -> Self {
        Self::Kind(kind)
    }
}

/// Where in a file a declaration sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    File,
    FileExport,
    FileRoot,
    NestedSelectors,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    #[default]
    Az,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionIndex {
    Index(i64),
    Detailed {
        index: i64,
        #[serde(default)]
        sorting: Sorting,
    },
}

impl PositionIndex {
    #[must_use]
    pub const fn index(self) -> i64 {
        match self {
            Self::Index(index) | Self::Detailed { index, .. } => index,
        }
    }

    #[must_use]
    pub const fn sorting(self) -> Sorting {
        match self {
            Self::Index(_) => Sorting::Az,
            Self::Detailed { sorting, .. } => sorting,
        }
    }
}

/// Naming, ordering and scope constraints for one or more selector kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorRule {
    pub selector: OneOrMany<Selector>,

    /// Absent means the whole file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<OneOrMany<Scope>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_index: Option<PositionIndex>,

    /// Substrings removed from the file name before `{fileName}` is computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_parts_to_remove: Option<OneOrMany<String>>,

    /// Defaults to `{camelCase}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OneOrMany<String>>,
}

impl SelectorRule {
    #[must_use]
    pub fn new(selector: impl Into<Selector>) -> Self {
        Self {
            selector: OneOrMany::One(selector.into()),
            scope: None,
            position_index: None,
            filename_parts_to_remove: None,
            format: None,
        }
    }
}

/// Custom text appended to prohibited-selector messages, per selector kind.
pub type CustomErrors = IndexMap<SelectorKind, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopePermission {
    Flag(bool),
    Errors(CustomErrors),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedSelectorPermissions {
    #[serde(default)]
    pub error: CustomErrors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_root: Option<ScopePermission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_export: Option<ScopePermission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_selectors: Option<ScopePermission>,
}

impl ScopedSelectorPermissions {
    #[must_use]
    pub const fn for_scope(&self, scope: Scope) -> Option<&ScopePermission> {
        match scope {
            Scope::FileRoot => self.file_root.as_ref(),
            Scope::FileExport => self.file_export.as_ref(),
            Scope::NestedSelectors => self.nested_selectors.as_ref(),
            Scope::File => None,
        }
    }
}

/// `allowOnlySpecifiedSelectors`: selectors without a matching rule are
/// reported when enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowOnlySpecifiedSelectors {
    Flag(bool),
    Scoped(ScopedSelectorPermissions),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSelectorsLimit {
    pub selector: OneOrMany<SelectorKind>,
    pub limit: usize,
}

/// Rules applied to the files matching `filePattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesRule {
    pub file_pattern: Pattern,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_only_specified_selectors: Option<AllowOnlySpecifiedSelectors>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub root_selectors_limits: Vec<RootSelectorsLimit>,

    #[serde(default)]
    pub rules: Vec<SelectorRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCompositionConfig {
    #[serde(default = "super::model::default_root")]
    pub project_root: PathBuf,

    pub files_rules: Vec<FilesRule>,

    #[serde(default)]
    pub regex_parameters: RegexParameters,
}

#[cfg(test)]
#[path = "composition_tests.rs"]
mod tests;
