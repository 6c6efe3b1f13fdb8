use std::path::Path;

use super::*;
use crate::error::LayoutGuardError;
use crate::filesystem::mock::MockFileSystem;

fn roots() -> ExistenceRoots<'static> {
    ExistenceRoots {
        project_root: Path::new("/project"),
        structure_root: Path::new("/project/src"),
    }
}

fn target(node_path: &'static str, node_type: NodeType) -> ExistenceTarget<'static> {
    let node_name = node_path.rsplit('/').next().unwrap_or(node_path);
    ExistenceTarget {
        node_name,
        node_path,
        node_type,
        location: format!("src/{node_path}"),
    }
}

#[test]
fn all_present_is_ok() {
    let fs = MockFileSystem::new()
        .with_file("/project/src/hooks/use-auth.ts", "")
        .with_file("/project/src/hooks/use-auth.test.ts", "");

    let result = check_existence(
        &fs,
        &roots(),
        target("hooks/use-auth.ts", NodeType::File),
        &["{node-name}.test.ts".to_string()],
    )
    .unwrap();
    assert_eq!(result, None);
}

#[test]
fn node_name_drops_only_last_extension() {
    let fs = MockFileSystem::new();

    let violation = check_existence(
        &fs,
        &roots(),
        target("api.client.ts", NodeType::File),
        &["{node_name}.md".to_string()],
    )
    .unwrap()
    .unwrap();
    assert!(matches!(
        violation,
        StructureViolation::Existence { missing, .. } if missing == ["./src/api.client.md"]
    ));
}

#[test]
fn parent_relative_entries_are_normalized() {
    let fs = MockFileSystem::new().with_dir("/project/src/shared");

    let result = check_existence(
        &fs,
        &roots(),
        target("features/auth", NodeType::Folder),
        &["../../shared".to_string(), "../../missing".to_string()],
    )
    .unwrap()
    .unwrap();
    assert!(matches!(
        result,
        StructureViolation::Existence { missing, .. } if missing == ["./src/missing"]
    ));
}

#[test]
fn unknown_reference_is_config_error() {
    let err = check_existence(
        &MockFileSystem::new(),
        &roots(),
        target("a.ts", NodeType::File),
        &["{fileName}.test.ts".to_string()],
    )
    .unwrap_err();
    assert!(matches!(err, LayoutGuardError::InvalidReference { .. }));
}
