//! Declaration classification.
//!
//! Every named declaration of a parsed file is mapped to one selector kind
//! and tagged with where it sits (top-level statement or nested) and, for
//! top-level ones, the name under which it is exported.

use crate::config::SelectorKind;

use super::syntax::{ClassMember, Expression, Node, Span, SyntaxFile, VariableDeclarator};

/// Name given to destructuring declarations; only selector permission applies.
pub(super) const DESTRUCTURED_NAME: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placement {
    /// Directly in the file body (possibly inside an `export`). `statement`
    /// indexes the body without imports.
    Root { statement: usize },
    Nested,
}

/// The name and node an exported declaration is validated under.
///
/// `export { a as b }` validates `b`, `export default { key: a }` validates
/// `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ExportBinding<'a> {
    pub name: &'a str,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Declaration<'a> {
    pub kind: SelectorKind,
    pub name: &'a str,
    pub expression_name: Option<&'a str>,
    pub span: Span,
    pub placement: Placement,
    pub export: Option<ExportBinding<'a>>,
}

/// All declarations of `file`, parents before their nested declarations.
pub(super) fn collect(file: &SyntaxFile) -> Vec<Declaration<'_>> {
    let mut collector = Collector {
        body: &file.body,
        declarations: Vec::new(),
    };
    let mut statement = 0;
    for node in &file.body {
        if matches!(node, Node::Import { .. }) {
            continue;
        }
        let placement = Placement::Root { statement };
        match node {
            Node::ExportNamed {
                declaration: Some(declaration),
                ..
            }
            | Node::ExportDefault { declaration, .. } => {
                collector.visit(declaration, placement, true);
            }
            other => collector.visit(other, placement, false),
        }
        statement += 1;
    }
    collector.declarations
}

/// Classify a variable declarator from its initializer.
pub(super) fn declarator_kind(init: Option<&Expression>, destructured: bool) -> SelectorKind {
    if init.and_then(Expression::expression_name).is_some() {
        return SelectorKind::VariableExpression;
    }
    match init {
        Some(Expression::ArrowFunction { .. }) if !destructured => SelectorKind::ArrowFunction,
        _ => SelectorKind::Variable,
    }
}

struct Collector<'a> {
    body: &'a [Node],
    declarations: Vec<Declaration<'a>>,
}

impl<'a> Collector<'a> {
    fn push(
        &mut self,
        kind: SelectorKind,
        name: &'a str,
        span: Span,
        placement: Placement,
        exported: bool,
    ) {
        self.push_expression(kind, name, None, span, placement, exported);
    }

    fn push_expression(
        &mut self,
        kind: SelectorKind,
        name: &'a str,
        expression_name: Option<&'a str>,
        span: Span,
        placement: Placement,
        exported: bool,
    ) {
        let export = match placement {
            _ if exported => Some(ExportBinding { name, span }),
            Placement::Root { .. } if name != DESTRUCTURED_NAME => find_export(self.body, name),
            _ => None,
        };
        self.declarations.push(Declaration {
            kind,
            name,
            expression_name,
            span,
            placement,
            export,
        });
    }

    fn visit(&mut self, node: &'a Node, placement: Placement, exported: bool) {
        match node {
            Node::Class {
                span,
                name,
                members,
            } => {
                if let Some(name) = name {
                    self.push(SelectorKind::Class, name, *span, placement, exported);
                }
                for member in members {
                    self.visit_member(member);
                }
            }
            Node::Function { span, name, body } => {
                if let Some(name) = name {
                    self.push(SelectorKind::Function, name, *span, placement, exported);
                }
                self.visit_nested(body);
            }
            Node::TypeAlias { span, name } => {
                self.push(SelectorKind::Type, name, *span, placement, exported);
            }
            Node::Interface { span, name } => {
                self.push(SelectorKind::Interface, name, *span, placement, exported);
            }
            Node::Enum { span, name } => {
                self.push(SelectorKind::Enum, name, *span, placement, exported);
            }
            Node::Variable { declarators, .. } => {
                for declarator in declarators {
                    self.visit_declarator(declarator, placement, exported);
                }
            }
            Node::Expression { expression, .. } => self.visit_expression(expression),
            Node::Block { body, .. } => self.visit_nested(body),
            _ => {}
        }
    }

    fn visit_declarator(
        &mut self,
        declarator: &'a VariableDeclarator,
        placement: Placement,
        exported: bool,
    ) {
        let init = declarator.init.as_ref();
        let name = declarator.name.as_deref().unwrap_or(DESTRUCTURED_NAME);
        let kind = declarator_kind(init, declarator.name.is_none());
        let expression_name = init.and_then(Expression::expression_name);
        self.push_expression(kind, name, expression_name, declarator.span, placement, exported);
        if let Some(init) = init {
            self.visit_expression(init);
        }
    }

    fn visit_member(&mut self, member: &'a ClassMember) {
        match member {
            ClassMember::Method { span, name, body } => {
                if let Some(name) = name {
                    self.push(SelectorKind::Function, name, *span, Placement::Nested, false);
                }
                self.visit_nested(body);
            }
            ClassMember::Property { span, name, value } => {
                if let Some(name) = name {
                    let kind = match value {
                        Some(Expression::ArrowFunction { .. }) => SelectorKind::ArrowFunction,
                        _ => SelectorKind::PropertyDefinition,
                    };
                    self.push(kind, name, *span, Placement::Nested, false);
                }
                if let Some(value) = value {
                    self.visit_expression(value);
                }
            }
            ClassMember::Other => {}
        }
    }

    fn visit_nested(&mut self, body: &'a [Node]) {
        for node in body {
            self.visit(node, Placement::Nested, false);
        }
    }

    fn visit_expression(&mut self, expression: &'a Expression) {
        match expression {
            Expression::ArrowFunction { body } | Expression::Function { body } => {
                self.visit_nested(body);
            }
            Expression::Call { callee, arguments } => {
                self.visit_expression(callee);
                for argument in arguments {
                    self.visit_expression(argument);
                }
            }
            Expression::Member { object } => self.visit_expression(object),
            Expression::TaggedTemplate { tag } => self.visit_expression(tag),
            Expression::As { expression } => self.visit_expression(expression),
            Expression::Identifier { .. } | Expression::Other => {}
        }
    }
}

/// Export of a top-level `name` through `export { .. }` or `export default`.
fn find_export<'a>(body: &'a [Node], name: &str) -> Option<ExportBinding<'a>> {
    let named = body.iter().find_map(|node| match node {
        Node::ExportNamed { specifiers, .. } => specifiers
            .iter()
            .find(|specifier| specifier.local == name)
            .map(|specifier| ExportBinding {
                name: specifier.exported.as_deref().unwrap_or(&specifier.local),
                span: specifier.span,
            }),
        _ => None,
    });
    named.or_else(|| {
        body.iter().find_map(|node| match node {
            Node::ExportDefault { declaration, .. } => find_default_export(declaration, name),
            _ => None,
        })
    })
}

fn find_default_export<'a>(declaration: &'a Node, name: &str) -> Option<ExportBinding<'a>> {
    let is_identifier = |node: &Node| matches!(node, Node::Identifier { name: id, .. } if id == name);
    match declaration {
        Node::Identifier { span, name: id } if id == name => Some(ExportBinding {
            name: id,
            span: *span,
        }),
        Node::Object { properties, .. } => properties.iter().find_map(|property| {
            let key = property.key.as_deref()?;
            is_identifier(&property.value).then_some(ExportBinding {
                name: key,
                span: property.span,
            })
        }),
        Node::Array { elements, .. } => elements.iter().find_map(|element| match element {
            Node::Identifier { span, name: id } if id == name => Some(ExportBinding {
                name: id,
                span: *span,
            }),
            _ => None,
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "declarations_tests.rs"]
mod tests;
