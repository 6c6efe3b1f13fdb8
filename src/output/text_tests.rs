use super::*;
use crate::diagnostic::{MessageId, SwapFix, TextRange};

fn position_diagnostic() -> Diagnostic {
    Diagnostic {
        file: "src/a.ts".to_string(),
        message_id: MessageId::InvalidPosition,
        message: "🔥 Invalid 'function' position. It is located in line 1 but should be in line 2. 🔥"
            .to_string(),
        location: Location::Node {
            line: 1,
            range: TextRange::new(0, 22),
        },
        fix: Some(SwapFix {
            first: TextRange::new(23, 45),
            second: TextRange::new(0, 22),
        }),
    }
}

#[test]
fn no_diagnostics_prints_summary_only() {
    let output = TextFormatter::new(ColorMode::Never).format(3, &[]).unwrap();
    assert_eq!(output, "Summary: 3 checked, 0 problems\n");
}

#[test]
fn node_diagnostic_shows_line_and_fix() {
    let output = TextFormatter::new(ColorMode::Never)
        .format(1, &[position_diagnostic()])
        .unwrap();

    assert!(output.starts_with("✗ FAILED [invalidPosition]: src/a.ts:1\n"));
    assert!(output.contains("   🔥 Invalid 'function' position."));
    assert!(output.contains("   Fix: swap 23..45 with 0..22\n"));
    assert!(output.ends_with("Summary: 1 checked, 1 problems\n"));
}

#[test]
fn multi_line_messages_are_indented() {
    let diagnostic = Diagnostic::error(
        "src/Bad.ts",
        "🔥 File 'Bad.ts' is invalid. 🔥\n\nAllowed names  = index.ts\nError location = ./src/Bad.ts\n\n",
    );

    let output = TextFormatter::new(ColorMode::Never)
        .format(1, &[diagnostic])
        .unwrap();
    assert!(output.contains("✗ FAILED [error]: src/Bad.ts\n   🔥 File 'Bad.ts' is invalid. 🔥\n\n   Allowed names  = index.ts\n"));
}

#[test]
fn colors_wrap_status_when_enabled() {
    let output = TextFormatter::new(ColorMode::Always)
        .format(1, &[position_diagnostic()])
        .unwrap();
    assert!(output.contains("\x1b[31mFAILED\x1b[0m"));
}
