use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::error::Result;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct Summary {
    checked: usize,
    failed: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, checked: usize, diagnostics: &[Diagnostic]) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                checked,
                failed: diagnostics.len(),
            },
            diagnostics,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
