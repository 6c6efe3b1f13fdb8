use std::fmt;

use serde::Serialize;

use crate::diagnostic::Diagnostic;

/// An import that crosses a module boundary.
///
/// `error_message` is the module's configured replacement text. `debug` is
/// the resolution dump appended when `debugMode` is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportViolation {
    /// An installed package the module may not use.
    ExternalImport {
        module: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        debug: Option<String>,
    },
    /// A project file outside every `allowImportsFrom` pattern.
    ImportNotAllowed {
        module: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        debug: Option<String>,
    },
    /// Neither a project file nor an installed package.
    ModuleNotFound,
}

impl ImportViolation {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ExternalImport {
                module,
                error_message,
                debug,
            } => with_debug(
                error_message.clone().unwrap_or_else(|| {
                    format!("🔥 External imports are not allowed in the module '{module}'. 🔥")
                }),
                debug.as_deref(),
            ),
            Self::ImportNotAllowed {
                module,
                error_message,
                debug,
            } => with_debug(
                error_message.clone().unwrap_or_else(|| {
                    format!("🔥 This import is not allowed in the module '{module}'. 🔥")
                }),
                debug.as_deref(),
            ),
            Self::ModuleNotFound => "🔥 Cannot find module. If the import includes a path alias, make sure that you have added the alias to the configuration. 🔥".to_string(),
        }
    }

    #[must_use]
    pub fn into_diagnostic(self, file: impl Into<String>) -> Diagnostic {
        Diagnostic::error(file, self.message())
    }
}

fn with_debug(message: String, debug: Option<&str>) -> String {
    match debug {
        Some(debug) => message + debug,
        None => message,
    }
}

impl fmt::Display for ImportViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
