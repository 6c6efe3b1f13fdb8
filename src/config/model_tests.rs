use super::*;

#[test]
fn folder_structure_config_has_expected_defaults() {
    let json = r#"{ "structure": [{ "name": "src", "children": [] }] }"#;

    let config: FolderStructureConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.project_root, PathBuf::from("."));
    assert_eq!(config.structure_root, PathBuf::from("."));
    assert!(config.rules.is_empty());
    assert!(config.regex_parameters.is_empty());
    let info = config.long_paths_info.info().unwrap();
    assert_eq!(info.max_length, DEFAULT_MAX_PATH_LENGTH);
    assert_eq!(info.root, "..");
    assert_eq!(info.mode, LongPathMode::Warn);
}

#[test]
fn structure_accepts_root_rule_or_children() {
    let root: Structure = serde_json::from_str(r#"{ "name": "src", "children": [] }"#).unwrap();
    assert!(matches!(root, Structure::Root(rule) if rule.name.as_deref() == Some("src")));

    let children: Structure = serde_json::from_str(r#"[{ "name": "index.ts" }]"#).unwrap();
    assert!(matches!(children, Structure::Children(rules) if rules.len() == 1));
}

#[test]
fn rule_deserializes_camel_case_fields() {
    let json = r#"{
        "ruleId": "feature",
        "name": "{kebab-case}",
        "enforceExistence": ["index.ts"],
        "folderRecursionLimit": 3,
        "children": [{ "name": "index.ts" }]
    }"#;

    let rule: Rule = serde_json::from_str(json).unwrap();
    assert_eq!(rule.rule_id.as_deref(), Some("feature"));
    assert_eq!(rule.folder_recursion_limit, Some(3));
    assert_eq!(
        rule.enforce_existence.unwrap().as_slice(),
        ["index.ts".to_string()]
    );
    assert!(rule.children.is_some());
}

#[test]
fn enforce_existence_accepts_single_string() {
    let rule: Rule = serde_json::from_str(r#"{ "name": "a", "enforceExistence": "b.ts" }"#).unwrap();
    assert_eq!(rule.enforce_existence, Some(OneOrMany::One("b.ts".to_string())));
}

#[test]
fn overlay_prefers_own_fields() {
    let base = Rule {
        name: Some("base".to_string()),
        children: Some(vec![Rule::file("index.ts")]),
        folder_recursion_limit: Some(2),
        ..Rule::default()
    };
    let local = Rule {
        rule_id: Some("base".to_string()),
        name: Some("override".to_string()),
        ..Rule::default()
    };

    let merged = local.overlay(&base);
    assert_eq!(merged.name.as_deref(), Some("override"));
    assert_eq!(merged.children, Some(vec![Rule::file("index.ts")]));
    assert_eq!(merged.folder_recursion_limit, Some(2));
    assert_eq!(merged.rule_id.as_deref(), Some("base"));
}

#[test]
fn folder_and_file_rules_differ_by_children() {
    assert!(Rule::folder("src", vec![]).is_folder());
    assert!(!Rule::file("index.ts").is_folder());
    assert!(!Rule::reference("x").is_folder());
}

#[test]
fn long_paths_toggle() {
    let disabled: LongPathsSetting = serde_json::from_str("false").unwrap();
    assert!(disabled.info().is_none());

    let enabled: LongPathsSetting = serde_json::from_str("true").unwrap();
    assert_eq!(enabled.info(), Some(LongPathsInfo::default()));
}

#[test]
fn long_paths_object_fills_missing_fields() {
    let json = r#"{ "maxLength": 100, "mode": "error" }"#;

    let setting: LongPathsSetting = serde_json::from_str(json).unwrap();
    let info = setting.info().unwrap();
    assert_eq!(info.max_length, 100);
    assert_eq!(info.mode, LongPathMode::Error);
    assert_eq!(info.root, "..");
    assert!(!info.count_from_system_root);
}

#[test]
fn folder_structure_config_from_yaml() {
    let yaml = r#"
structureRoot: src
ignorePatterns: ["**/*.snap"]
structure:
  - name: "{PascalCase}"
    children:
      - name: "{FolderName}.tsx"
rules:
  component:
    name: "{PascalCase}"
    children: []
"#;

    let config: FolderStructureConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.structure_root, PathBuf::from("src"));
    assert_eq!(config.rules.len(), 1);
    assert!(matches!(config.structure, Structure::Children(_)));
}
