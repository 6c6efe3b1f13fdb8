use std::fmt::Write;

use crate::diagnostic::{Diagnostic, Location};
use crate::error::Result;

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human-readable output: one block per diagnostic, then a summary line.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic, output: &mut String) {
        let position = match &diagnostic.location {
            Location::File => String::new(),
            Location::Node { line, .. } => format!(":{line}"),
        };
        let status = self.colorize("FAILED", ansi::RED);
        writeln!(
            output,
            "✗ {status} [{}]: {}{position}",
            diagnostic.message_id, diagnostic.file
        )
        .ok();

        for line in diagnostic.message.trim_end().lines() {
            if line.is_empty() {
                writeln!(output).ok();
            } else {
                writeln!(output, "   {line}").ok();
            }
        }

        if let Some(fix) = &diagnostic.fix {
            let fix_text = self.colorize("Fix", ansi::YELLOW);
            writeln!(
                output,
                "   {fix_text}: swap {}..{} with {}..{}",
                fix.first.start, fix.first.end, fix.second.start, fix.second.end
            )
            .ok();
        }
    }

    fn format_summary(&self, checked: usize, failed: usize) -> String {
        let failed_text = if failed == 0 {
            self.colorize("0", ansi::GREEN)
        } else {
            self.colorize(&failed.to_string(), ansi::RED)
        };
        format!("Summary: {checked} checked, {failed_text} problems")
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, checked: usize, diagnostics: &[Diagnostic]) -> Result<String> {
        let mut output = String::new();
        for diagnostic in diagnostics {
            self.format_diagnostic(diagnostic, &mut output);
            writeln!(output).ok();
        }
        writeln!(output, "{}", self.format_summary(checked, diagnostics.len())).ok();
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
