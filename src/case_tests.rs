use regex::Regex;

use super::*;

fn full_match(fragment: &str, input: &str) -> bool {
    Regex::new(&format!("^{fragment}$")).unwrap().is_match(input)
}

#[test]
fn camel_case_from_kebab_and_snake() {
    assert_eq!(transform("my-component", Case::Camel), "myComponent");
    assert_eq!(transform("my_component", Case::Camel), "myComponent");
    assert_eq!(transform("MyComponent", Case::Camel), "myComponent");
}

#[test]
fn camel_case_treats_all_uppercase_as_single_token() {
    assert_eq!(transform("ABC", Case::Camel), "abc");
    assert_eq!(transform("MY_ID", Case::Camel), "myId");
}

#[test]
fn pascal_case_uppercases_first_letter() {
    assert_eq!(transform("my-component", Case::Pascal), "MyComponent");
    assert_eq!(transform("ABC", Case::Pascal), "Abc");
    assert_eq!(transform("", Case::Pascal), "");
}

#[test]
fn snake_case_inserts_boundaries() {
    assert_eq!(transform("myComponent", Case::Snake), "my_component");
    assert_eq!(transform("file2Name", Case::Snake), "file_2_name");
    assert_eq!(transform("my--component name", Case::Snake), "my_component_name");
}

#[test]
fn screaming_snake_case_is_uppercased_snake() {
    assert_eq!(transform("myComponent", Case::ScreamingSnake), "MY_COMPONENT");
}

#[test]
fn kebab_case_breaks_acronym_before_capitalized_word() {
    assert_eq!(transform("HTTPServer", Case::Kebab), "http-server");
    assert_eq!(transform("myComponent", Case::Kebab), "my-component");
    assert_eq!(transform("my_component", Case::Kebab), "my-component");
    assert_eq!(transform("a1b", Case::Kebab), "a-1-b");
}

#[test]
fn transform_is_idempotent_per_convention() {
    let inputs = [
        "my-id",
        "MyComponent",
        "HTTPServer",
        "user_profile2",
        "ABC",
        "someValue42Test",
        "already-kebab",
    ];
    for case in Case::ALL {
        for input in inputs {
            let once = transform(input, case);
            assert_eq!(transform(&once, case), once, "{case} on {input}");
        }
    }
}

#[test]
fn transformed_output_matches_convention_fragment() {
    for input in ["my-component", "UserProfile", "order_item"] {
        assert!(full_match(Case::Camel.regex(), &transform(input, Case::Camel)));
        assert!(full_match(Case::Pascal.regex(), &transform(input, Case::Pascal)));
        assert!(full_match(Case::Snake.regex(), &transform(input, Case::Snake)));
        assert!(full_match(
            Case::ScreamingSnake.regex(),
            &transform(input, Case::ScreamingSnake)
        ));
        assert!(full_match(Case::Kebab.regex(), &transform(input, Case::Kebab)));
    }
}

#[test]
fn strict_camel_case_rejects_consecutive_capitals() {
    assert!(full_match(STRICT_CAMEL_CASE_REGEX, "strictCamelCase"));
    assert!(!full_match(STRICT_CAMEL_CASE_REGEX, "notSTRICT"));
    assert!(full_match(CAMEL_CASE_REGEX, "notSTRICT"));
}

#[test]
fn strict_pascal_case_requires_leading_capital() {
    assert!(full_match(STRICT_PASCAL_CASE_REGEX, "StrictPascal"));
    assert!(!full_match(STRICT_PASCAL_CASE_REGEX, "strictPascal"));
}

#[test]
fn case_parses_from_convention_name() {
    assert_eq!("kebab-case".parse::<Case>().unwrap(), Case::Kebab);
    assert_eq!("SNAKE_CASE".parse::<Case>().unwrap(), Case::ScreamingSnake);
    assert!("Title Case".parse::<Case>().is_err());
}
