pub mod composition;
pub mod modules;
pub mod structure;

pub use composition::{CompositionDiagnostic, CompositionViolation, FileCompositionChecker};
pub use modules::{ImportViolation, IndependentModulesChecker};
pub use structure::{FolderStructureChecker, NodeType, StructureViolation};
