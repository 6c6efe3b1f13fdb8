use super::*;
use crate::diagnostic::{Location, MessageId, TextRange};

#[test]
fn json_contains_summary_and_camel_case_diagnostics() {
    let diagnostics = vec![
        Diagnostic::error("src/a.ts", "🔥 Cannot find module. 🔥"),
        Diagnostic {
            file: "src/b.ts".to_string(),
            message_id: MessageId::InvalidName,
            message: "bad".to_string(),
            location: Location::Node {
                line: 4,
                range: TextRange::new(10, 20),
            },
            fix: None,
        },
    ];

    let output = JsonFormatter.format(5, &diagnostics).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["summary"]["checked"], 5);
    assert_eq!(parsed["summary"]["failed"], 2);
    assert_eq!(parsed["diagnostics"][0]["messageId"], "error");
    assert_eq!(parsed["diagnostics"][0]["location"]["kind"], "file");
    assert_eq!(parsed["diagnostics"][1]["location"]["line"], 4);
    assert!(parsed["diagnostics"][1].get("fix").is_none());
}

#[test]
fn empty_run_has_empty_array() {
    let output = JsonFormatter.format(0, &[]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["diagnostics"], serde_json::json!([]));
}
