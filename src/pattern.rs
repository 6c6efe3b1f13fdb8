//! Glob matching with disjunction/conjunction pattern lists.
//!
//! - `"src/**"` — a single glob, the whole input must match.
//! - `["src/**", "lib/**"]` — any member may match (OR).
//! - `[["src/**", "**/*.ts"]]` — a nested list requires every glob to match (AND).
//!
//! Path separators are significant: `*` never crosses a `/`, `**` does.

use globset::{GlobBuilder, GlobMatcher};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutGuardError, Result};

/// One member of a pattern list: a glob, or a group of globs that must all match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternItem {
    Glob(String),
    All(Vec<String>),
}

impl PatternItem {
    /// Glob strings of this item, in declaration order.
    #[must_use]
    pub fn globs(&self) -> &[String] {
        match self {
            Self::Glob(glob) => std::slice::from_ref(glob),
            Self::All(globs) => globs,
        }
    }

    /// Returns true when every glob of this item matches `input`.
    ///
    /// # Errors
    /// Returns an error if a glob cannot be compiled.
    pub fn is_match(&self, input: &str) -> Result<bool> {
        for glob in self.globs() {
            if !compile_glob(glob)?.is_match(input) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl From<&str> for PatternItem {
    fn from(glob: &str) -> Self {
        Self::Glob(glob.to_string())
    }
}

/// A single glob or an OR-list of [`PatternItem`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    Single(String),
    Any(Vec<PatternItem>),
}

impl Pattern {
    /// Alternatives of this pattern; a single glob is a one-element list.
    #[must_use]
    pub fn items(&self) -> Vec<PatternItem> {
        match self {
            Self::Single(glob) => vec![PatternItem::Glob(glob.clone())],
            Self::Any(items) => items.clone(),
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::Any(Vec::new())
    }
}

impl From<&str> for Pattern {
    fn from(glob: &str) -> Self {
        Self::Single(glob.to_string())
    }
}

/// Compile one glob with separator-aware semantics.
///
/// # Errors
/// Returns [`LayoutGuardError::InvalidPattern`] if the glob is malformed.
pub fn compile_glob(glob: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| LayoutGuardError::InvalidPattern {
            pattern: glob.to_string(),
            source,
        })
}

/// Precompiled [`Pattern`] for repeated matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    alternatives: Vec<Vec<GlobMatcher>>,
}

impl CompiledPattern {
    /// # Errors
    /// Returns an error if any glob of the pattern is malformed.
    pub fn new(pattern: &Pattern) -> Result<Self> {
        let alternatives = pattern
            .items()
            .iter()
            .map(|item| item.globs().iter().map(|g| compile_glob(g)).collect())
            .collect::<Result<Vec<Vec<_>>>>()?;
        Ok(Self { alternatives })
    }

    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        self.alternatives
            .iter()
            .any(|globs| globs.iter().all(|glob| glob.is_match(input)))
    }

    /// True when the pattern has no alternatives (matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// One-shot match of `input` against `pattern`.
///
/// # Errors
/// Returns an error if any glob of the pattern is malformed.
pub fn matches(input: &str, pattern: &Pattern) -> Result<bool> {
    Ok(CompiledPattern::new(pattern)?.is_match(input))
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
