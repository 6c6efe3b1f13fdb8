use std::path::Path;

use crate::config::{LongPathMode, LongPathsInfo};
use crate::path_utils::{normalize, relative_to, to_slash};

use super::violation::StructureViolation;

/// Measure `file` (absolute) per `info`.
///
/// Returns the violation in `error` mode. In `warn` mode the overflow is
/// logged and `None` is returned.
pub(super) fn check_long_path(
    info: &LongPathsInfo,
    project_root: &Path,
    file: &Path,
) -> Option<StructureViolation> {
    let measured = if info.count_from_system_root {
        to_slash(&normalize(file))
    } else {
        relative_to(file, &project_root.join(&info.root))
    };
    let path_length = measured.chars().count();
    if path_length <= info.max_length {
        return None;
    }

    match info.mode {
        LongPathMode::Warn => {
            tracing::warn!(
                path = %measured,
                path_length,
                max_length = info.max_length,
                "long path detected"
            );
            None
        }
        LongPathMode::Error => Some(StructureViolation::LongPath {
            max_length: info.max_length,
            path_length,
            path: measured,
        }),
    }
}

#[cfg(test)]
#[path = "long_path_tests.rs"]
mod tests;
