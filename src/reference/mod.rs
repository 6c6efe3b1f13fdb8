//! Placeholder (`{name}`) expansion.
//!
//! Patterns in every rule family may embed references:
//! - case regex fragments (`{camelCase}`, `{kebab-case}`, ...),
//! - user `regexParameters`,
//! - names derived from the current file/folder (`{fileName}`, `{FolderName}`, ...),
//! - path references resolved against a concrete file (`{dirname_N}`, `{family_N}`),
//! - reusable import patterns (see [`reusable`]).

mod path;
pub mod reusable;

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use indexmap::IndexMap;
use regex::Regex;

use crate::case::{CASE_REGEX_PARAMETERS, Case};
use crate::error::{LayoutGuardError, Result};

pub use path::{
    NO_FAMILY, dirname_path, family_path, is_path_reference, resolve_dirname_references,
    resolve_family_references, resolve_path_references,
};
pub use reusable::{ReusablePatterns, expand_reusable_patterns, extract_reusable_references};

/// Maximum number of nested expansions/resolutions before giving up.
pub const RECURSION_LIMIT: usize = 1000;

/// Regex replacing a `*` wildcard inside a single path segment.
pub const WILDCARD_REGEX: &str = "(([^/]*)+)";

const DOT_CHARACTER_REGEX: &str = r"\.";

/// User-defined and built-in `{name}` → regex fragment mappings.
pub type RegexParameters = IndexMap<String, String>;

/// References derived from the parent folder name in folder-structure rules.
pub const FOLDER_NAME_REFERENCES: [(&str, Case); 5] = [
    ("folderName", Case::Camel),
    ("FolderName", Case::Pascal),
    ("folder-name", Case::Kebab),
    ("folder_name", Case::Snake),
    ("FOLDER_NAME", Case::ScreamingSnake),
];

/// References derived from the matched node in `enforceExistence` entries.
pub const NODE_NAME_REFERENCES: [(&str, Case); 5] = [
    ("nodeName", Case::Camel),
    ("NodeName", Case::Pascal),
    ("node-name", Case::Kebab),
    ("node_name", Case::Snake),
    ("NODE_NAME", Case::ScreamingSnake),
];

/// References derived from the file name in file-composition formats.
pub const FILE_NAME_REFERENCES: [(&str, Case); 4] = [
    ("fileName", Case::Camel),
    ("FileName", Case::Pascal),
    ("file_name", Case::Snake),
    ("FILE_NAME", Case::ScreamingSnake),
];

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("Invalid regex"));
static QUANTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(,\d*)?$").expect("Invalid regex"));

/// Concrete file/target pair used to resolve `{dirname}` and `{family}`.
///
/// Without a file, path references are not available and count as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceContext<'a> {
    pub file: Option<&'a str>,
    pub target: Option<&'a str>,
}

impl<'a> ReferenceContext<'a> {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            file: None,
            target: None,
        }
    }

    #[must_use]
    pub const fn for_import(file: &'a str, target: &'a str) -> Self {
        Self {
            file: Some(file),
            target: Some(target),
        }
    }
}

/// Names of all `{name}` references in `pattern`, in order of appearance.
///
/// Regex quantifiers such as `{2}` or `{1,3}` are not references.
#[must_use]
pub fn extract_references(pattern: &str) -> Vec<String> {
    REFERENCE
        .captures_iter(pattern)
        .map(|caps| caps[1].to_string())
        .filter(|name| !QUANTIFIER.is_match(name))
        .collect()
}

/// Expand every reference in `pattern`.
///
/// `key` names the configuration field the pattern came from and is only used
/// in the error message.
///
/// # Errors
/// Returns [`LayoutGuardError::InvalidReference`] when a reference is neither a
/// parameter nor a path reference available in `context`.
pub fn expand(
    pattern: &str,
    parameters: &RegexParameters,
    key: &str,
    context: &ReferenceContext<'_>,
) -> Result<String> {
    let path_references_allowed = context.file.is_some();
    let invalid: Vec<String> = extract_references(pattern)
        .into_iter()
        .filter(|name| {
            !parameters.contains_key(name) && !(path_references_allowed && is_path_reference(name))
        })
        .map(|name| format!("{{{name}}}"))
        .collect();

    if !invalid.is_empty() {
        return Err(LayoutGuardError::InvalidReference {
            references: invalid,
            key: key.to_string(),
            allowed: parameters.keys().cloned().collect(),
        });
    }

    let expanded = parameters
        .iter()
        .fold(pattern.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        });

    match (context.file, context.target) {
        (Some(file), Some(target)) => Ok(resolve_path_references(&expanded, file, target)),
        (Some(file), None) => Ok(resolve_dirname_references(&expanded, file)),
        _ => Ok(expanded),
    }
}

/// Parameters for a name pattern: case fragments, then user parameters, then
/// the case-converted `name` under each of `name_references`.
///
/// Later entries win, so built-in name references shadow user parameters.
#[must_use]
pub fn name_parameters(
    user: &RegexParameters,
    name_references: &[(&str, Case)],
    name: &str,
) -> RegexParameters {
    let mut parameters: RegexParameters = CASE_REGEX_PARAMETERS
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    parameters.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
    parameters.extend(
        name_references
            .iter()
            .map(|(key, case)| ((*key).to_string(), case.apply(name))),
    );
    parameters
}

/// Only the case-converted `name` under each of `name_references`.
#[must_use]
pub fn reference_parameters(name_references: &[(&str, Case)], name: &str) -> RegexParameters {
    name_references
        .iter()
        .map(|(key, case)| ((*key).to_string(), case.apply(name)))
        .collect()
}

/// Substitute only the case-converted name references, leaving every other
/// reference in place. Used to display allowed names and formats.
#[must_use]
pub fn substitute_name_references(
    pattern: &str,
    name_references: &[(&str, Case)],
    name: &str,
) -> String {
    name_references
        .iter()
        .fold(pattern.to_string(), |acc, (key, case)| {
            acc.replace(&format!("{{{key}}}"), &case.apply(name))
        })
}

/// Convert a folder/file rule name into regex source.
///
/// `.` is literal (`..` means regex `.`) and `*` is a segment wildcard
/// (`**` means regex `*`).
#[must_use]
pub fn name_to_regex(name: &str) -> String {
    let escaped = name
        .replace('.', DOT_CHARACTER_REGEX)
        .replace(&DOT_CHARACTER_REGEX.repeat(2), ".");
    wildcard_to_regex(&escaped)
}

/// Convert `*` wildcards into [`WILDCARD_REGEX`] (`**` means regex `*`).
#[must_use]
pub fn wildcard_to_regex(pattern: &str) -> String {
    pattern
        .replace('*', WILDCARD_REGEX)
        .replace(&WILDCARD_REGEX.repeat(2), "*")
}

/// Compile `regex` anchored at both ends.
///
/// # Errors
/// Returns [`LayoutGuardError::InvalidRegex`] if the source does not compile.
pub fn compile_anchored(regex: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{regex})$")).map_err(|source| LayoutGuardError::InvalidRegex {
        regex: regex.to_string(),
        source,
    })
}

/// Anchored regexes keyed by their source, shared across validations.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl RegexCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled form of `regex`, anchored as by [`compile_anchored`].
    ///
    /// # Errors
    /// Returns [`LayoutGuardError::InvalidRegex`] if the source does not compile.
    pub fn get(&self, regex: &str) -> Result<Regex> {
        if let Some(found) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(regex)
        {
            return Ok(found.clone());
        }
        let compiled = compile_anchored(regex)?;
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(regex.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Convenience for `get(regex)?.is_match(input)`.
    ///
    /// # Errors
    /// Returns [`LayoutGuardError::InvalidRegex`] if the source does not compile.
    pub fn is_match(&self, regex: &str, input: &str) -> Result<bool> {
        Ok(self.get(regex)?.is_match(input))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
