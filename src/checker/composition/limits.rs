use indexmap::IndexMap;

use crate::config::{RootSelectorsLimit, SelectorKind};

use super::declarations::declarator_kind;
use super::syntax::Node;
use super::violation::{CompositionViolation, ExceededLimit};

/// Occurrences of each selector kind among top-level statements.
///
/// Export wrappers are unwrapped; each variable declarator counts once.
pub(super) fn count_root_selectors(body: &[Node]) -> IndexMap<SelectorKind, usize> {
    let mut counts: IndexMap<SelectorKind, usize> = IndexMap::new();
    let mut increment = |kind: SelectorKind| *counts.entry(kind).or_default() += 1;

    for node in body {
        let node = match node {
            Node::ExportNamed {
                declaration: Some(declaration),
                ..
            }
            | Node::ExportDefault { declaration, .. } => declaration.as_ref(),
            other => other,
        };
        match node {
            Node::Class { .. } => increment(SelectorKind::Class),
            Node::Function { .. } => increment(SelectorKind::Function),
            Node::TypeAlias { .. } => increment(SelectorKind::Type),
            Node::Interface { .. } => increment(SelectorKind::Interface),
            Node::Enum { .. } => increment(SelectorKind::Enum),
            Node::Variable { declarators, .. } => {
                for declarator in declarators {
                    increment(declarator_kind(declarator.init.as_ref(), false));
                }
            }
            _ => {}
        }
    }
    counts
}

/// One aggregated violation listing every exceeded group, if any.
pub(super) fn check_root_limits(
    body: &[Node],
    limits: &[RootSelectorsLimit],
) -> Option<CompositionViolation> {
    if limits.is_empty() {
        return None;
    }
    let counts = count_root_selectors(body);
    let exceeded: Vec<ExceededLimit> = limits
        .iter()
        .filter_map(|group| {
            let selectors = group.selector.as_slice().to_vec();
            let occurrences = selectors
                .iter()
                .map(|kind| counts.get(kind).copied().unwrap_or(0))
                .sum();
            (occurrences > group.limit).then_some(ExceededLimit {
                selectors,
                limit: group.limit,
                occurrences,
            })
        })
        .collect();

    if exceeded.is_empty() {
        return None;
    }
    tracing::debug!(groups = exceeded.len(), "root selector limits exceeded");
    Some(CompositionViolation::RootSelectorsLimits { exceeded })
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod tests;
