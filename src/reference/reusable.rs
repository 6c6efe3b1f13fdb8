//! Named import-pattern lists referenced as `{name}` inside other patterns.
//!
//! A reference can replace a whole pattern (the referenced list is spliced in)
//! or be part of a larger glob, in which case it must resolve to exactly one
//! glob.

use indexmap::IndexMap;

use super::{RECURSION_LIMIT, extract_references, is_path_reference};
use crate::error::{LayoutGuardError, Result};
use crate::pattern::PatternItem;

/// `reusableImportPatterns`: name → pattern list.
pub type ReusablePatterns = IndexMap<String, Vec<PatternItem>>;

/// Expand reusable references in `patterns`.
///
/// With no reusable patterns configured, `patterns` is returned unchanged.
///
/// # Errors
/// Fails on unknown or cyclic references, or when a multi-pattern reference
/// is used as part of a glob.
pub fn extract_reusable_references(
    patterns: &[PatternItem],
    reusable: Option<&ReusablePatterns>,
) -> Result<Vec<PatternItem>> {
    match reusable {
        Some(reusable) => expand_items(patterns, reusable, RECURSION_LIMIT, false),
        None => Ok(patterns.to_vec()),
    }
}

/// Expand every entry of the reusable map against the map itself.
///
/// A reusable list spliced whole into another reusable list must not contain
/// nested lists.
///
/// # Errors
/// See [`extract_reusable_references`]; additionally fails with
/// [`LayoutGuardError::NestedArrayInPattern`].
pub fn expand_reusable_patterns(reusable: &ReusablePatterns) -> Result<ReusablePatterns> {
    reusable
        .iter()
        .map(|(key, patterns)| {
            expand_items(patterns, reusable, RECURSION_LIMIT, true)
                .map(|expanded| (key.clone(), expanded))
        })
        .collect()
}

fn reusable_reference_names(glob: &str) -> Vec<String> {
    extract_references(glob)
        .into_iter()
        .filter(|name| !is_path_reference(name) && !name.contains(','))
        .collect()
}

fn expand_items(
    items: &[PatternItem],
    reusable: &ReusablePatterns,
    depth: usize,
    check_nested: bool,
) -> Result<Vec<PatternItem>> {
    if depth == 0 {
        return Err(LayoutGuardError::RecursionLimitExceeded(describe(items)));
    }

    let mut expanded = Vec::with_capacity(items.len());
    for item in items {
        match item {
            PatternItem::Glob(glob) => {
                expanded.extend(expand_glob(glob, reusable, depth, check_nested)?);
            }
            PatternItem::All(globs) => {
                let members: Vec<PatternItem> =
                    globs.iter().cloned().map(PatternItem::Glob).collect();
                let group = expand_items(&members, reusable, depth - 1, check_nested)?;
                expanded.push(PatternItem::All(into_globs(group, item)?));
            }
        }
    }
    Ok(expanded)
}

fn expand_glob(
    glob: &str,
    reusable: &ReusablePatterns,
    depth: usize,
    check_nested: bool,
) -> Result<Vec<PatternItem>> {
    let names = reusable_reference_names(glob);
    let Some(key) = names.first() else {
        return Ok(vec![PatternItem::Glob(glob.to_string())]);
    };
    let reference = reusable
        .get(key)
        .ok_or_else(|| LayoutGuardError::UnknownReusablePattern(key.clone()))?;
    let placeholder = format!("{{{key}}}");

    if glob == placeholder {
        if check_nested && reference.iter().any(|item| matches!(item, PatternItem::All(_))) {
            return Err(LayoutGuardError::NestedArrayInPattern {
                key: key.clone(),
                patterns: describe(reference),
            });
        }
        return expand_items(reference, reusable, depth - 1, check_nested);
    }

    let resolved = expand_items(reference, reusable, depth - 1, check_nested)?;
    let [PatternItem::Glob(replacement)] = resolved.as_slice() else {
        return Err(LayoutGuardError::ReferenceAsPartOfPattern {
            key: key.clone(),
            pattern: glob.to_string(),
        });
    };
    let replaced = glob.replace(&placeholder, replacement);

    if names.len() > 1 {
        if depth <= 1 {
            return Err(LayoutGuardError::RecursionLimitExceeded(replaced));
        }
        expand_glob(&replaced, reusable, depth - 1, check_nested)
    } else {
        Ok(vec![PatternItem::Glob(replaced)])
    }
}

/// Members of an AND-group after expansion; a group cannot nest further.
fn into_globs(group: Vec<PatternItem>, original: &PatternItem) -> Result<Vec<String>> {
    group
        .into_iter()
        .map(|item| match item {
            PatternItem::Glob(glob) => Ok(glob),
            PatternItem::All(_) => Err(LayoutGuardError::NestedArrayInPattern {
                key: original.globs().join(", "),
                patterns: describe(std::slice::from_ref(original)),
            }),
        })
        .collect()
}

fn describe(items: &[PatternItem]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| format!("{items:?}"))
}

#[cfg(test)]
#[path = "reusable_tests.rs"]
mod tests;
