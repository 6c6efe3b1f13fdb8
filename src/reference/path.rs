//! `{dirname_N}` and `{family_N}` path references.
//!
//! `{dirname_N}` is the importing file's directory walked up `N` times
//! (default 1). `{family_N}` is the longest common leading path of the
//! importing file and the import target, available only when at least `N`
//! segments are shared (default 2).

use std::sync::LazyLock;

use regex::Regex;

/// Replacement for `{family}` when the two paths share too few segments.
pub const NO_FAMILY: &str = "NO_FAMILY";

const DEFAULT_DIRNAME_LEVEL: usize = 1;
const DEFAULT_FAMILY_LEVEL: usize = 2;

static DIRNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{dirname(?:_(\d+))?\}").expect("Invalid regex"));
static FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{family(?:_(\d+))?\}").expect("Invalid regex"));
static PATH_REFERENCE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:dirname|family)(?:_\d+)?$").expect("Invalid regex"));

/// True for `dirname`, `dirname_N`, `family` and `family_N`.
#[must_use]
pub fn is_path_reference(name: &str) -> bool {
    PATH_REFERENCE_NAME.is_match(name)
}

/// Level declared by the first match of `regex` in `pattern`.
///
/// When `pattern` mixes `{dirname}` and `{family}` references, the default
/// level applies to both.
fn declared_level(pattern: &str, regex: &Regex, other: &Regex, default: usize) -> usize {
    if other.is_match(pattern) {
        return default;
    }
    regex
        .captures(pattern)
        .and_then(|caps| caps.get(1))
        .and_then(|level| level.as_str().parse().ok())
        .unwrap_or(default)
}

/// POSIX `dirname` on a `/`-separated path.
fn posix_dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." };
    }
    match trimmed.rfind('/') {
        None => ".",
        Some(0) => "/",
        Some(index) => trimmed[..index].trim_end_matches('/'),
    }
}

/// `file`'s directory, walked up `level` times.
#[must_use]
pub fn dirname_path(file: &str, level: usize) -> String {
    (0..level)
        .fold(file, |path, _| posix_dirname(path))
        .to_string()
}

/// Longest common leading path of `file` and `target`, or [`NO_FAMILY`] when
/// fewer than `level` segments are shared.
#[must_use]
pub fn family_path(file: &str, target: &str, level: usize) -> String {
    let common: Vec<&str> = file
        .split('/')
        .zip(target.split('/'))
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect();

    if common.len() < level {
        NO_FAMILY.to_string()
    } else {
        common.join("/")
    }
}

/// Replace every `{dirname_N}` in `pattern`.
///
/// All occurrences resolve to the level declared by the first one.
#[must_use]
pub fn resolve_dirname_references(pattern: &str, file: &str) -> String {
    if !DIRNAME.is_match(pattern) {
        return pattern.to_string();
    }
    let level = declared_level(pattern, &DIRNAME, &FAMILY, DEFAULT_DIRNAME_LEVEL);
    let dirname = dirname_path(file, level);
    DIRNAME
        .replace_all(pattern, regex::NoExpand(&dirname))
        .into_owned()
}

/// Replace every `{family_N}` in `pattern`.
#[must_use]
pub fn resolve_family_references(pattern: &str, file: &str, target: &str) -> String {
    if !FAMILY.is_match(pattern) {
        return pattern.to_string();
    }
    let level = declared_level(pattern, &FAMILY, &DIRNAME, DEFAULT_FAMILY_LEVEL);
    let family = family_path(file, target, level);
    FAMILY
        .replace_all(pattern, regex::NoExpand(&family))
        .into_owned()
}

/// Resolve both path reference kinds in `pattern`.
#[must_use]
pub fn resolve_path_references(pattern: &str, file: &str, target: &str) -> String {
    let dirname_level = declared_level(pattern, &DIRNAME, &FAMILY, DEFAULT_DIRNAME_LEVEL);
    let family_level = declared_level(pattern, &FAMILY, &DIRNAME, DEFAULT_FAMILY_LEVEL);

    let dirname = dirname_path(file, dirname_level);
    let with_dirname = DIRNAME.replace_all(pattern, regex::NoExpand(&dirname));
    let family = family_path(file, target, family_level);
    FAMILY
        .replace_all(&with_dirname, regex::NoExpand(&family))
        .into_owned()
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
