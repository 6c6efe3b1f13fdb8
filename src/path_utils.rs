use std::path::{Component, Path, PathBuf};

/// Render a path with `/` separators regardless of platform.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root (or above the start of a relative
/// path) is kept for relative paths and dropped for absolute ones.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// `path` relative to `base`, with `/` separators. Both are normalized first.
///
/// Walks up with `..` when `path` is not below `base`. Identical paths give
/// an empty string.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> String {
    let path = normalize(path);
    let base = normalize(base);
    let path_components: Vec<Component<'_>> = path.components().collect();
    let base_components: Vec<Component<'_>> = base.components().collect();

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let parents = std::iter::repeat_n("..".to_string(), base_components.len() - common);
    let rest = path_components[common..]
        .iter()
        .map(|component| component.as_os_str().to_string_lossy().into_owned());
    parents.chain(rest).collect::<Vec<_>>().join("/")
}

/// File or folder name without its last extension (`a.test.ts` → `a.test`).
///
/// Dot-files and names without a dot are returned unchanged.
#[must_use]
pub fn strip_last_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if index > 0 => &name[..index],
        _ => name,
    }
}

#[cfg(test)]
#[path = "path_utils_tests.rs"]
mod tests;
