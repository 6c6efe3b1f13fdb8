use std::path::Path;

use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::path_utils::{normalize, relative_to, strip_last_extension};
use crate::reference::{NODE_NAME_REFERENCES, ReferenceContext, expand, reference_parameters};

use super::violation::{NodeType, StructureViolation};

/// A node whose `enforceExistence` entries are being checked.
pub(super) struct ExistenceTarget<'a> {
    pub node_name: &'a str,
    /// Path of the node relative to the structure root (`""` for the root).
    pub node_path: &'a str,
    pub node_type: NodeType,
    pub location: String,
}

/// Roots the required entries are resolved and reported against.
pub(super) struct ExistenceRoots<'a> {
    pub project_root: &'a Path,
    pub structure_root: &'a Path,
}

/// Check every required entry of `target`; all missing ones are reported in a
/// single violation.
///
/// A file's entries resolve relative to its folder, a folder's relative to
/// itself. `{nodeName}` and friends come from the node name without its last
/// extension.
pub(super) fn check_existence(
    fs: &dyn FileSystem,
    roots: &ExistenceRoots<'_>,
    target: ExistenceTarget<'_>,
    required: &[String],
) -> Result<Option<StructureViolation>> {
    let parameters =
        reference_parameters(&NODE_NAME_REFERENCES, strip_last_extension(target.node_name));
    let base = match target.node_type {
        NodeType::File => Path::new(target.node_path)
            .parent()
            .unwrap_or_else(|| Path::new("")),
        NodeType::Folder => Path::new(target.node_path),
    };
    let base = roots.structure_root.join(base);

    let mut missing = Vec::new();
    for entry in required {
        let expanded = expand(
            entry,
            &parameters,
            "enforceExistence",
            &ReferenceContext::none(),
        )?;
        let path = normalize(&base.join(&expanded));
        if !fs.exists(&path) {
            missing.push(format!("./{}", relative_to(&path, roots.project_root)));
        }
    }

    if missing.is_empty() {
        return Ok(None);
    }
    tracing::debug!(node = target.node_path, ?missing, "enforced entries missing");
    Ok(Some(StructureViolation::Existence {
        node_type: target.node_type,
        node_name: target.node_name.to_string(),
        missing,
        location: target.location,
    }))
}

#[cfg(test)]
#[path = "existence_tests.rs"]
mod tests;
