//! Import specifier → project path.
//!
//! Specifiers go through three steps before a module rule sees them:
//! alias expansion, conversion to a path relative to `baseUrl`, and
//! extension probing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::filesystem::FileSystem;
use crate::path_utils::relative_to;

/// Extensions probed for specifiers written without one, in order.
pub const FILE_EXTENSIONS: [&str; 22] = [
    ".js", ".jsx", ".mjs", ".cjs", ".d.ts", ".ts", ".tsx", ".vue", ".svelte", ".json", ".jsonc",
    ".yml", ".yaml", ".svg", ".png", ".jpg", ".ico", ".css", ".scss", ".sass", ".less", ".html",
];

/// Installed-package roots, relative to the project root.
const PACKAGE_ROOTS: [&str; 4] = [
    "node_modules",
    "node_modules/@types",
    "node_modules/node",
    "node_modules/@types/node",
];

/// Prefix of an alias-expanded specifier; the rest is relative to `baseUrl`.
pub const ALIAS_MARKER: char = ':';

/// Every alias expansion of `import`, or `import` itself when no alias key
/// applies.
///
/// A key with `*` matches any specifier starting with the key minus the `*`.
/// A key without `*` matches only itself.
#[must_use]
pub fn alias_variants(import: &str, paths: &IndexMap<String, Vec<String>>) -> Vec<String> {
    let variants: Vec<String> = paths
        .iter()
        .filter_map(|(key, targets)| {
            let rest = alias_remainder(import, key)?;
            Some(targets.iter().map(move |target| {
                format!("{ALIAS_MARKER}{}{rest}", target.replacen('*', "", 1))
            }))
        })
        .flatten()
        .collect();

    if variants.is_empty() {
        vec![import.to_string()]
    } else {
        variants
    }
}

fn alias_remainder<'a>(import: &'a str, key: &str) -> Option<&'a str> {
    if key.contains('*') {
        import.strip_prefix(key.replacen('*', "", 1).as_str())
    } else {
        (import == key).then_some("")
    }
}

/// `import` relative to `base_root`.
///
/// Alias-marked specifiers resolve against `base_root`, `./` and `../`
/// specifiers against the importing file's folder. Bare specifiers are
/// returned unchanged.
#[must_use]
pub fn to_base_relative(import: &str, importer_dir: &Path, base_root: &Path) -> String {
    if let Some(aliased) = import.strip_prefix(ALIAS_MARKER) {
        return relative_to(&base_root.join(aliased), base_root);
    }
    if import.starts_with('.') {
        return relative_to(&importer_dir.join(import), base_root);
    }
    import.to_string()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut joined = OsString::from(path.as_os_str());
    joined.push(suffix);
    PathBuf::from(joined)
}

/// Filesystem lookups for base-relative import targets.
pub struct ImportResolver<'a, F: FileSystem> {
    pub fs: &'a F,
    pub project_root: &'a Path,
    pub base_root: &'a Path,
    pub extensions: &'a [String],
}

impl<F: FileSystem> ImportResolver<'_, F> {
    fn extensions(&self) -> impl Iterator<Item = &str> {
        FILE_EXTENSIONS
            .iter()
            .copied()
            .chain(self.extensions.iter().map(String::as_str))
    }

    fn candidates(&self, import: &str) -> Vec<PathBuf> {
        std::iter::once(self.base_root.join(import))
            .chain(
                PACKAGE_ROOTS
                    .iter()
                    .map(|root| self.project_root.join(root).join(import)),
            )
            .collect()
    }

    /// `import` with the first extension that exists appended, either
    /// directly or as `<import>/index<ext>`.
    ///
    /// Specifiers that already end with a known extension, and specifiers
    /// with no match, are returned unchanged.
    #[must_use]
    pub fn with_extension(&self, import: &str) -> String {
        if self.extensions().any(|extension| import.ends_with(extension)) {
            return import.to_string();
        }

        let direct = self.candidates(import);
        let index = self.candidates(&format!("{import}/index"));
        let exists_with = |paths: &[PathBuf], extension: &str| {
            paths
                .iter()
                .any(|path| self.fs.exists(&with_suffix(path, extension)))
        };

        for extension in self.extensions() {
            if exists_with(&direct, extension) {
                return format!("{import}{extension}");
            }
            if exists_with(&index, extension) {
                return format!("{import}/index{extension}");
            }
        }
        import.to_string()
    }

    /// True when `import` exists below the base root.
    #[must_use]
    pub fn exists(&self, import: &str) -> bool {
        self.fs.exists(&self.base_root.join(import))
    }

    /// True when `import`, or its first segment, is an installed package.
    #[must_use]
    pub fn is_external(&self, import: &str) -> bool {
        if import.starts_with('.') {
            return false;
        }
        let first_segment = import.split(['.', ':', '/']).next().unwrap_or_default();
        [import, first_segment]
            .into_iter()
            .filter(|name| !name.is_empty())
            .any(|name| {
                PACKAGE_ROOTS
                    .iter()
                    .any(|root| self.fs.exists(&self.project_root.join(root).join(name)))
            })
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
