mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{ColorMode, TextFormatter};

use crate::diagnostic::Diagnostic;
use crate::error::Result;

/// Trait for rendering the diagnostics of one run.
pub trait OutputFormatter {
    /// Format `diagnostics` reported for `checked` inputs (files or imports).
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, checked: usize, diagnostics: &[Diagnostic]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Formatter for this format; `color` only affects text output.
    #[must_use]
    pub fn formatter(self, color: ColorMode) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(color)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
