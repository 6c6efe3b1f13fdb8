use super::*;

fn registry(entries: Vec<(&str, Rule)>) -> RuleRegistry {
    entries
        .into_iter()
        .map(|(id, rule)| (id.to_string(), rule))
        .collect()
}

fn feature_registry(limit: Option<usize>) -> RuleRegistry {
    let mut feature = Rule::folder(
        "feature",
        vec![Rule::reference("feature"), Rule::file("index.ts")],
    );
    feature.folder_recursion_limit = limit;
    registry(vec![("feature", feature)])
}

#[test]
fn rule_without_reference_is_returned_unchanged() {
    let rule = Rule::file("index.ts");
    assert_eq!(resolve_rule(&rule, &RuleRegistry::new()).unwrap(), rule);
}

#[test]
fn reference_fields_are_overridden_locally() {
    let rules = registry(vec![(
        "component",
        Rule::folder("{PascalCase}", vec![Rule::file("index.ts")]),
    )]);
    let local = Rule {
        rule_id: Some("component".to_string()),
        name: Some("Button".to_string()),
        ..Rule::default()
    };

    let resolved = resolve_rule(&local, &rules).unwrap();
    assert_eq!(resolved.name.as_deref(), Some("Button"));
    assert_eq!(resolved.children, Some(vec![Rule::file("index.ts")]));
    assert!(resolved.rule_id.is_none());
}

#[test]
fn chained_references_are_followed() {
    let rules = registry(vec![
        ("a", Rule::reference("b")),
        ("b", Rule::file("b.ts")),
    ]);

    let resolved = resolve_rule(&Rule::reference("a"), &rules).unwrap();
    assert_eq!(resolved, Rule::file("b.ts"));
}

#[test]
fn unknown_rule_id_is_an_error() {
    let err = resolve_rule(&Rule::reference("missing"), &RuleRegistry::new()).unwrap_err();
    assert!(matches!(err, LayoutGuardError::UnknownRuleId(id) if id == "missing"));
}

#[test]
fn cyclic_references_hit_the_recursion_limit() {
    let rules = registry(vec![("a", Rule::reference("b")), ("b", Rule::reference("a"))]);

    let err = resolve_rule(&Rule::reference("a"), &rules).unwrap_err();
    assert!(matches!(err, LayoutGuardError::RecursionLimitExceeded(_)));
}

#[test]
fn resolving_twice_gives_identical_trees() {
    let rules = unroll_folder_recursion(&feature_registry(Some(3))).unwrap();
    let reference = Rule::reference("feature");

    let first = resolve_rule(&reference, &rules).unwrap();
    let second = resolve_rule(&reference, &rules).unwrap();
    assert_eq!(first, second);
}

#[test]
fn children_are_deduplicated_by_name_and_kind() {
    let parent = Rule::folder(
        "src",
        vec![
            Rule::file("index.ts"),
            Rule::file("index.ts"),
            Rule::folder("index.ts", vec![]),
            Rule::default(),
            Rule::default(),
        ],
    );

    let children = resolve_children(&parent, &RuleRegistry::new()).unwrap();
    assert_eq!(children.len(), 4);
    assert!(!children[0].is_folder());
    assert!(children[1].is_folder());
}

#[test]
fn file_rule_has_no_children() {
    let children = resolve_children(&Rule::file("a.ts"), &RuleRegistry::new()).unwrap();
    assert!(children.is_empty());
}

#[test]
fn contains_rule_id_finds_nested_self_reference() {
    let rules = registry(vec![
        ("feature", Rule::folder("feature", vec![Rule::reference("group")])),
        ("group", Rule::folder("group", vec![Rule::reference("feature")])),
    ]);

    assert!(contains_rule_id(&Rule::reference("group"), "feature", &rules).unwrap());
    assert!(!contains_rule_id(&Rule::file("x.ts"), "feature", &rules).unwrap());
}

#[test]
fn contains_rule_id_terminates_on_unrelated_cycles() {
    let rules = registry(vec![
        ("loop", Rule::folder("loop", vec![Rule::reference("loop")])),
        ("feature", Rule::folder("feature", vec![])),
    ]);

    assert!(!contains_rule_id(&Rule::reference("loop"), "feature", &rules).unwrap());
}

#[test]
fn unroll_materializes_limit_levels() {
    let rules = unroll_folder_recursion(&feature_registry(Some(2))).unwrap();

    let expected = Rule::folder(
        "feature",
        vec![
            Rule::folder(
                "feature",
                vec![Rule::file("feature"), Rule::file("index.ts")],
            ),
            Rule::file("index.ts"),
        ],
    );
    assert_eq!(rules["feature"], expected);
    assert_eq!(rules["feature"].folder_recursion_limit, None);
}

#[test]
fn unroll_through_intermediate_rule() {
    let mut feature = Rule::folder("feature", vec![Rule::reference("group")]);
    feature.folder_recursion_limit = Some(2);
    let rules = registry(vec![
        ("feature", feature),
        (
            "group",
            Rule::folder("{kebab-case}", vec![Rule::reference("feature")]),
        ),
    ]);

    let unrolled = unroll_folder_recursion(&rules).unwrap();
    let expected = Rule::folder(
        "feature",
        vec![Rule::folder(
            "{kebab-case}",
            vec![Rule::folder(
                "feature",
                vec![Rule::folder("{kebab-case}", vec![Rule::file("feature")])],
            )],
        )],
    );
    assert_eq!(unrolled["feature"], expected);
    assert_eq!(unrolled["group"], rules["group"]);
}

#[test]
fn entries_without_limit_are_kept_verbatim() {
    let rules = feature_registry(None);
    assert_eq!(unroll_folder_recursion(&rules).unwrap(), rules);

    let zero = feature_registry(Some(0));
    assert_eq!(unroll_folder_recursion(&zero).unwrap(), zero);
}

#[test]
fn limit_above_ceiling_is_rejected() {
    let err = unroll_folder_recursion(&feature_registry(Some(RECURSION_LIMIT + 1))).unwrap_err();
    assert!(matches!(
        err,
        LayoutGuardError::FolderRecursionLimitTooLarge { declared, .. } if declared == RECURSION_LIMIT + 1
    ));
}

#[test]
fn display_order_prefers_literal_folders() {
    let rules = vec![
        Rule::file("*"),
        Rule::file("{kebab-case}.ts"),
        Rule::file("*.test.ts"),
        Rule::file("index.ts"),
        Rule::folder("components", vec![]),
        Rule::default(),
    ];

    let names: Vec<&str> = sort_for_display(&rules)
        .into_iter()
        .filter_map(|rule| rule.name.as_deref())
        .collect();
    assert_eq!(
        names,
        ["components", "index.ts", "*.test.ts", "{kebab-case}.ts", "*"]
    );
}
