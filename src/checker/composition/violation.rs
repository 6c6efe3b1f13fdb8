use std::fmt;

use serde::Serialize;

use crate::config::{Scope, SelectorKind};
use crate::diagnostic::{Diagnostic, Location, MessageId, SwapFix};

/// A `rootSelectorsLimits` group whose occurrences exceed its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceededLimit {
    pub selectors: Vec<SelectorKind>,
    pub limit: usize,
    pub occurrences: usize,
}

/// A file-composition validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CompositionViolation {
    /// Every rule for the selector rejected the name. `formats` are shown
    /// with file-name references already substituted.
    InvalidName {
        selector: SelectorKind,
        formats: Vec<String>,
    },
    InvalidPosition {
        selector: SelectorKind,
        current_line: usize,
        correct_line: usize,
        fix: SwapFix,
    },
    /// No rule covers the selector while `allowOnlySpecifiedSelectors` is on.
    ProhibitedSelector {
        scope: Scope,
        selector: SelectorKind,
        /// Already wrapped in blank lines, empty when none is configured.
        custom_error: String,
    },
    RootSelectorsLimits { exceeded: Vec<ExceededLimit> },
}

impl CompositionViolation {
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        match self {
            Self::InvalidName { .. } => MessageId::InvalidName,
            Self::InvalidPosition { .. } => MessageId::InvalidPosition,
            Self::ProhibitedSelector { scope, .. } => match scope {
                Scope::FileExport => MessageId::ProhibitedSelectorExport,
                Scope::NestedSelectors => MessageId::ProhibitedSelectorNested,
                Scope::FileRoot | Scope::File => MessageId::ProhibitedSelectorRoot,
            },
            Self::RootSelectorsLimits { .. } => MessageId::RootSelectorsLimits,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidName { selector, formats } => format!(
                "🔥 Invalid '{selector}' name, allowed formats = {} 🔥",
                formats.join(", ")
            ),
            Self::InvalidPosition {
                selector,
                current_line,
                correct_line,
                ..
            } => format!(
                "🔥 Invalid '{selector}' position. It is located in line {current_line} but should be in line {correct_line}. 🔥"
            ),
            Self::ProhibitedSelector {
                scope,
                selector,
                custom_error,
            } => match scope {
                Scope::FileExport => {
                    format!("🔥 Exporting '{selector}' is prohibited in this file. 🔥{custom_error}")
                }
                Scope::NestedSelectors => format!(
                    "🔥 The use of nested '{selector}' is prohibited in this file. 🔥{custom_error}"
                ),
                Scope::FileRoot | Scope::File => format!(
                    "🔥 The use of '{selector}' is prohibited in the root of the file. 🔥{custom_error}"
                ),
            },
            Self::RootSelectorsLimits { exceeded } => {
                let details: String = exceeded
                    .iter()
                    .map(|group| {
                        let selectors = group
                            .selectors
                            .iter()
                            .map(|selector| format!("'{selector}'"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!(
                            "\nSelector: {selectors}, limit = {}, occurrences = {}.",
                            group.limit, group.occurrences
                        )
                    })
                    .collect();
                format!(
                    "🔥 The limit for the given selectors in the root of the file has been exceeded. 🔥\n{details}\n\n"
                )
            }
        }
    }

    #[must_use]
    pub const fn fix(&self) -> Option<SwapFix> {
        match self {
            Self::InvalidPosition { fix, .. } => Some(*fix),
            _ => None,
        }
    }
}

impl fmt::Display for CompositionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A violation and the syntax node it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionDiagnostic {
    pub violation: CompositionViolation,
    pub location: Location,
}

impl CompositionDiagnostic {
    #[must_use]
    pub fn into_diagnostic(self, file: impl Into<String>) -> Diagnostic {
        Diagnostic {
            file: file.into(),
            message_id: self.violation.message_id(),
            message: self.violation.message(),
            location: self.location,
            fix: self.violation.fix(),
        }
    }
}
