use std::fmt;

use serde::Serialize;

/// Kind of path segment being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeType {
    File,
    Folder,
}

impl NodeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Folder => "Folder",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A folder-structure validation failure.
///
/// `location` fields are relative to the project root and carry no `./`
/// prefix; [`StructureViolation::message`] adds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StructureViolation {
    /// No child rule of the right kind matches the segment name.
    Name {
        node_type: NodeType,
        node_name: String,
        allowed_names: Vec<String>,
        location: String,
    },
    /// The parent folder only declares children of the other kind.
    NodeType {
        node_type: NodeType,
        node_name: String,
        parent_name: String,
        location: String,
    },
    /// Entries required by `enforceExistence` are missing.
    Existence {
        node_type: NodeType,
        node_name: String,
        missing: Vec<String>,
        location: String,
    },
    /// The path is longer than `longPathsInfo.maxLength`.
    LongPath {
        max_length: usize,
        path_length: usize,
        path: String,
    },
}

impl StructureViolation {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Name {
                node_type,
                node_name,
                allowed_names,
                location,
            } => format!(
                "🔥 {node_type} '{node_name}' is invalid. 🔥\n\nAllowed names  = {}\nError location = ./{location}\n\n",
                allowed_names.join(", ")
            ),
            Self::NodeType {
                node_type,
                node_name,
                parent_name,
                location,
            } => {
                let allowed_kind = match node_type {
                    NodeType::File => "folders",
                    NodeType::Folder => "files",
                };
                format!(
                    "🔥 {node_type} '{node_name}' is invalid. 🔥\n\nAccording to the structure, the '{parent_name}' folder can only contain {allowed_kind}.\nError location = ./{location}\n\n"
                )
            }
            Self::Existence {
                node_type,
                node_name,
                missing,
                location,
            } => format!(
                "🔥 {node_type} '{node_name}' enforces the existence of other folders/files. 🔥\n\nEnforce existence = {}\nError location = ./{location}\n\n",
                missing.join(", ")
            ),
            Self::LongPath {
                max_length,
                path_length,
                path,
            } => format!(
                "🔥 Long path detected. 🔥\n\nToo long paths can cause various issues, such as errors when moving or copying a project, unexpected behavior of various tools.\nTry flattening the folder structure or using shorter names for nested folders.\nIf you know what you're doing and don't want to see this message, set 'longPathsInfo' in the configuration to 'false'.\n\nMax length = {max_length}\nPath length = {path_length}\nPath = {path}\n\n"
            ),
        }
    }
}

impl fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
