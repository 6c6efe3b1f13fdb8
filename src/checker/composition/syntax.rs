//! Pre-parsed syntax consumed by the composition checker.
//!
//! An external parser emits one JSON document per source file. Only the
//! shapes needed to classify declarations are modeled; any other statement is
//! sent as `{ "type": "other", "span": ... }`.
//!
//! ```json
//! { "body": [
//!   { "type": "import", "span": { "start": 0, "end": 22, "line": 1 } },
//!   { "type": "exportNamed", "span": { "start": 24, "end": 60, "line": 3 },
//!     "declaration": { "type": "function", "span": { "start": 31, "end": 60, "line": 3 }, "name": "load" } }
//! ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Location, TextRange};

/// Byte range of a node plus the line it starts on (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    #[must_use]
    pub const fn range(self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    #[must_use]
    pub const fn location(self) -> Location {
        Location::Node {
            line: self.line,
            range: self.range(),
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxFile {
    #[serde(default)]
    pub body: Vec<Node>,
}

impl SyntaxFile {
    /// Top-level statements except imports, in source order.
    #[must_use]
    pub fn body_without_imports(&self) -> Vec<&Node> {
        self.body
            .iter()
            .filter(|node| !matches!(node, Node::Import { .. }))
            .collect()
    }
}

/// Statement or declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Import {
        span: Span,
    },
    /// `export <declaration>` or `export { a, b as c }`.
    ExportNamed {
        span: Span,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        declaration: Option<Box<Node>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        specifiers: Vec<ExportSpecifier>,
    },
    ExportDefault {
        span: Span,
        declaration: Box<Node>,
    },
    ExportAll {
        span: Span,
    },
    Class {
        span: Span,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        members: Vec<ClassMember>,
    },
    Function {
        span: Span,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        body: Vec<Node>,
    },
    TypeAlias {
        span: Span,
        name: String,
    },
    Interface {
        span: Span,
        name: String,
    },
    Enum {
        span: Span,
        name: String,
    },
    Variable {
        span: Span,
        declarators: Vec<VariableDeclarator>,
    },
    /// Expression statement, e.g. a top-level `describe(...)` call.
    Expression {
        span: Span,
        expression: Expression,
    },
    /// Any block (`if`, `for`, ...) whose statements are scanned for declarations.
    Block {
        span: Span,
        #[serde(default)]
        body: Vec<Node>,
    },
    Identifier {
        span: Span,
        name: String,
    },
    Object {
        span: Span,
        #[serde(default)]
        properties: Vec<Property>,
    },
    Array {
        span: Span,
        #[serde(default)]
        elements: Vec<Node>,
    },
    Other {
        span: Span,
    },
}

impl Node {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Import { span }
            | Self::ExportNamed { span, .. }
            | Self::ExportDefault { span, .. }
            | Self::ExportAll { span }
            | Self::Class { span, .. }
            | Self::Function { span, .. }
            | Self::TypeAlias { span, .. }
            | Self::Interface { span, .. }
            | Self::Enum { span, .. }
            | Self::Variable { span, .. }
            | Self::Expression { span, .. }
            | Self::Block { span, .. }
            | Self::Identifier { span, .. }
            | Self::Object { span, .. }
            | Self::Array { span, .. }
            | Self::Other { span } => *span,
        }
    }

    /// The declaration wrapped by an `export`, or the node itself.
    #[must_use]
    pub fn unwrap_export(&self) -> Option<&Self> {
        match self {
            Self::ExportNamed { declaration, .. } => declaration.as_deref(),
            Self::ExportDefault { declaration, .. } => Some(declaration.as_ref()),
            other => Some(other),
        }
    }
}

/// `local` or `local as exported` inside `export { ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpecifier {
    pub local: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported: Option<String>,
    /// Span of the exported identifier.
    pub span: Span,
}

/// `key: value` of an object literal. `key` is absent for computed keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Span of the key.
    pub span: Span,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub span: Span,
    /// Absent for destructuring patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClassMember {
    Method {
        span: Span,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        body: Vec<Node>,
    },
    Property {
        span: Span,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Expression>,
    },
    #[serde(other)]
    Other,
}

/// Initializer shapes that matter for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expression {
    ArrowFunction {
        #[serde(default)]
        body: Vec<Node>,
    },
    Function {
        #[serde(default)]
        body: Vec<Node>,
    },
    Call {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
    },
    TaggedTemplate {
        tag: Box<Expression>,
    },
    /// `expr as Type`.
    As {
        expression: Box<Expression>,
    },
    Identifier {
        name: String,
    },
    #[serde(other)]
    Other,
}

impl Expression {
    /// Identifier at the root of a call, member or tagged-template chain.
    ///
    /// `styled.div\`...\`` gives `styled`, `createStore()()` gives
    /// `createStore`, `a.b.c` gives `a`. Plain identifiers and literals give
    /// `None`.
    #[must_use]
    pub fn expression_name(&self) -> Option<&str> {
        match self {
            Self::Call { callee, .. } => match callee.as_ref() {
                Self::Identifier { name } => Some(name.as_str()),
                Self::Call { .. } | Self::Member { .. } => callee.expression_name(),
                _ => None,
            },
            Self::Member { object } => match object.as_ref() {
                Self::Identifier { name } => Some(name.as_str()),
                Self::Member { .. } => object.expression_name(),
                _ => None,
            },
            Self::TaggedTemplate { tag } => match tag.as_ref() {
                Self::Identifier { name } => Some(name.as_str()),
                Self::Member { .. } | Self::Call { .. } => tag.expression_name(),
                _ => None,
            },
            Self::As { expression } => match expression.as_ref() {
                Self::Call { .. } | Self::TaggedTemplate { .. } => expression.expression_name(),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
