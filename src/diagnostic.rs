//! Diagnostics reported by the three check families.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable diagnostic kind.
///
/// Composition checks use the specific ids. Folder-structure and import
/// checks report the generic [`MessageId::Error`] with free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    InvalidName,
    InvalidPosition,
    ProhibitedSelectorRoot,
    ProhibitedSelectorNested,
    ProhibitedSelectorExport,
    RootSelectorsLimits,
    Error,
}

impl MessageId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidName => "invalidName",
            Self::InvalidPosition => "invalidPosition",
            Self::ProhibitedSelectorRoot => "prohibitedSelectorRoot",
            Self::ProhibitedSelectorNested => "prohibitedSelectorNested",
            Self::ProhibitedSelectorExport => "prohibitedSelectorExport",
            Self::RootSelectorsLimits => "rootSelectorsLimits",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range `[start, end)` into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Where a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Location {
    /// The whole file (folder-structure and import checks).
    File,
    /// A syntax node of the file.
    Node { line: usize, range: TextRange },
}

/// The only automatic fix offered: swap the text of two declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapFix {
    pub first: TextRange,
    pub second: TextRange,
}

impl SwapFix {
    /// Apply the swap to `source`. Ranges must not overlap.
    #[must_use]
    pub fn apply(&self, source: &str) -> Option<String> {
        let (a, b) = if self.first.start <= self.second.start {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        };
        if a.end > b.start || b.end > source.len() {
            return None;
        }
        let mut fixed = String::with_capacity(source.len());
        fixed.push_str(source.get(..a.start)?);
        fixed.push_str(source.get(b.start..b.end)?);
        fixed.push_str(source.get(a.end..b.start)?);
        fixed.push_str(source.get(a.start..a.end)?);
        fixed.push_str(source.get(b.end..)?);
        Some(fixed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    pub message_id: MessageId,
    pub message: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<SwapFix>,
}

impl Diagnostic {
    /// A generic whole-file diagnostic.
    #[must_use]
    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message_id: MessageId::Error,
            message: message.into(),
            location: Location::File,
            fix: None,
        }
    }
}

/// Receiver of diagnostics produced by a check.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
