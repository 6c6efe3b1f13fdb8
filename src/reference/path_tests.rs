use super::*;

#[test]
fn recognizes_path_reference_names() {
    assert!(is_path_reference("dirname"));
    assert!(is_path_reference("dirname_3"));
    assert!(is_path_reference("family"));
    assert!(is_path_reference("family_1"));
    assert!(!is_path_reference("dirnames"));
    assert!(!is_path_reference("family_x"));
}

#[test]
fn dirname_walks_up_levels() {
    assert_eq!(dirname_path("src/a/b/file.ts", 1), "src/a/b");
    assert_eq!(dirname_path("src/a/b/file.ts", 2), "src/a");
    assert_eq!(dirname_path("src/a/b/file.ts", 5), ".");
    assert_eq!(dirname_path("/abs/file.ts", 2), "/");
}

#[test]
fn family_requires_enough_shared_segments() {
    assert_eq!(family_path("src/a/b/x.ts", "src/a/c/y.ts", 2), "src/a");
    assert_eq!(family_path("src/a/b/x.ts", "src/z/y.ts", 2), NO_FAMILY);
    assert_eq!(family_path("src/a/b/x.ts", "src/z/y.ts", 1), "src");
}

#[test]
fn dirname_level_comes_from_first_reference() {
    assert_eq!(
        resolve_dirname_references("{dirname_2}/**", "src/a/b/x.ts"),
        "src/a/**"
    );
    assert_eq!(
        resolve_dirname_references("{dirname}/*.ts", "src/a/b/x.ts"),
        "src/a/b/*.ts"
    );
}

#[test]
fn mixed_references_use_default_levels() {
    assert_eq!(
        resolve_path_references("{dirname_3}/{family_1}", "src/a/b/x.ts", "src/a/c/y.ts"),
        "src/a/b/src/a"
    );
}

#[test]
fn pattern_without_references_is_unchanged() {
    assert_eq!(
        resolve_path_references("src/**", "src/a.ts", "src/b.ts"),
        "src/**"
    );
}
