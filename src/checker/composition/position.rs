//! `positionIndex` ordering.
//!
//! Top-level declarations that a position rule recognizes are ranked:
//! non-negative indexes first (ascending), then negative ones counted from
//! the end of the file. The resulting slot is compared with where the
//! declaration actually sits.

use std::cmp::Ordering;

use crate::config::{Selector, SelectorKind, Sorting};
use crate::diagnostic::TextRange;

use super::declarations::declarator_kind;
use super::syntax::{Expression, Node};

/// A named top-level declaration as seen by position rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct BodyEntry<'a> {
    pub kind: SelectorKind,
    pub name: &'a str,
    pub expression_name: Option<&'a str>,
    /// Range of the declaration (first declarator for variables).
    pub range: TextRange,
}

/// A rule that declares a `positionIndex`, prepared for the current file.
pub(super) struct PositionRule<'r> {
    pub index: i64,
    pub selectors: &'r [Selector],
    pub regexes: Vec<String>,
}

/// Named declarations of the body (imports already removed), in source order.
///
/// A variable statement is represented by its first declarator.
pub(super) fn body_entries<'a>(body: &[&'a Node]) -> Vec<BodyEntry<'a>> {
    body.iter()
        .copied()
        .filter_map(Node::unwrap_export)
        .filter_map(|node| match node {
            Node::Variable { declarators, .. } => {
                let first = declarators.first()?;
                let name = first.name.as_deref()?;
                let init = first.init.as_ref();
                Some(BodyEntry {
                    kind: declarator_kind(init, false),
                    name,
                    expression_name: init.and_then(Expression::expression_name),
                    range: first.span.range(),
                })
            }
            Node::Function { span, name, .. } => {
                entry(SelectorKind::Function, name.as_deref()?, span.range())
            }
            Node::Class { span, name, .. } => {
                entry(SelectorKind::Class, name.as_deref()?, span.range())
            }
            Node::Interface { span, name } => entry(SelectorKind::Interface, name, span.range()),
            Node::TypeAlias { span, name } => entry(SelectorKind::Type, name, span.range()),
            Node::Enum { span, name } => entry(SelectorKind::Enum, name, span.range()),
            _ => None,
        })
        .collect()
}

fn entry(kind: SelectorKind, name: &str, range: TextRange) -> Option<BodyEntry<'_>> {
    Some(BodyEntry {
        kind,
        name,
        expression_name: None,
        range,
    })
}

/// Order entries per `sorting`; `none` keeps source order.
pub(super) fn sort_entries(entries: &mut [BodyEntry<'_>], sorting: Sorting) {
    if sorting == Sorting::Az {
        entries.sort_by(|a, b| natural_cmp(a.name, b.name));
    }
}

/// Slot assigned to `range`, given `(requested index, range)` pairs in
/// ranking order. Unranked declarations get slot 0.
pub(super) fn target_slot(ranked: &[(i64, TextRange)], range: TextRange, body_len: usize) -> usize {
    let mut ordered: Vec<&(i64, TextRange)> = ranked.iter().collect();
    ordered.sort_by(|(a, _), (b, _)| match (*a < 0, *b < 0) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    });

    let (negative, positive): (Vec<_>, Vec<_>) =
        ordered.into_iter().partition(|(index, _)| *index < 0);
    let from_start = positive
        .iter()
        .enumerate()
        .map(|(slot, (_, entry_range))| (slot, *entry_range));
    let from_end = negative
        .iter()
        .rev()
        .enumerate()
        .map(|(offset, (_, entry_range))| (body_len.saturating_sub(offset + 1), *entry_range));

    from_start
        .chain(from_end)
        .find(|(_, entry_range)| *entry_range == range)
        .map_or(0, |(slot, _)| slot)
}

/// Case-insensitive comparison where digit runs compare by value
/// (`item2` < `item10`).
pub(super) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_digits = take_digits(&mut left);
                let r_digits = take_digits(&mut right);
                let by_value = l_digits
                    .len()
                    .cmp(&r_digits.len())
                    .then_with(|| l_digits.cmp(&r_digits));
                if by_value != Ordering::Equal {
                    return by_value;
                }
            }
            (Some(l), Some(r)) => {
                let by_char = l.to_lowercase().cmp(r.to_lowercase());
                if by_char != Ordering::Equal {
                    return by_char;
                }
                left.next();
                right.next();
            }
        }
    }
}

/// Consume a digit run, without leading zeros.
fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;
