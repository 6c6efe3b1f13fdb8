//! Rule tree resolution: `ruleId` references and bounded self-recursion.

use std::collections::HashSet;

use crate::config::{Rule, RuleRegistry};
use crate::error::{LayoutGuardError, Result};
use crate::reference::RECURSION_LIMIT;

/// How deep inline children are searched for a self-reference.
const SELF_REFERENCE_SEARCH_DEPTH: usize = 20;

/// Follow `rule.ruleId` through `registry`. Fields set on `rule` win over the
/// referenced ones; chained references are followed until a rule without
/// `ruleId` is reached.
///
/// # Errors
/// - [`LayoutGuardError::UnknownRuleId`] for a reference missing from `registry`.
/// - [`LayoutGuardError::RecursionLimitExceeded`] after [`RECURSION_LIMIT`] hops.
pub fn resolve_rule(rule: &Rule, registry: &RuleRegistry) -> Result<Rule> {
    let mut current = rule.clone();
    for _ in 0..RECURSION_LIMIT {
        let Some(rule_id) = current.rule_id.take() else {
            return Ok(current);
        };
        let base = registry
            .get(&rule_id)
            .ok_or_else(|| LayoutGuardError::UnknownRuleId(rule_id.clone()))?;
        current = current.overlay(base);
    }
    Err(LayoutGuardError::RecursionLimitExceeded(
        rule.rule_id.clone().unwrap_or_default(),
    ))
}

/// Resolved children of a folder rule, keeping the first of each
/// name/kind pair. Nameless children are always kept.
///
/// # Errors
/// Propagates resolution errors of any child.
pub fn resolve_children(rule: &Rule, registry: &RuleRegistry) -> Result<Vec<Rule>> {
    let Some(children) = &rule.children else {
        return Ok(Vec::new());
    };

    let mut seen: HashSet<(String, bool)> = HashSet::new();
    let mut resolved = Vec::with_capacity(children.len());
    for child in children {
        let child = resolve_rule(child, registry)?;
        if let Some(name) = &child.name
            && !seen.insert((name.clone(), child.is_folder()))
        {
            continue;
        }
        resolved.push(child);
    }
    Ok(resolved)
}

/// True when `rule`, through its children, refers back to `rule_id`.
///
/// # Errors
/// Propagates resolution errors.
pub fn contains_rule_id(rule: &Rule, rule_id: &str, registry: &RuleRegistry) -> Result<bool> {
    let mut visited = HashSet::new();
    contains_rule_id_inner(rule, rule_id, registry, SELF_REFERENCE_SEARCH_DEPTH, &mut visited)
}

fn contains_rule_id_inner(
    rule: &Rule,
    rule_id: &str,
    registry: &RuleRegistry,
    depth: usize,
    visited: &mut HashSet<String>,
) -> Result<bool> {
    if depth == 0 {
        return Ok(false);
    }
    let resolved = resolve_rule(rule, registry)?;
    for child in resolved.children.iter().flatten() {
        if child.rule_id.as_deref() == Some(rule_id) {
            return Ok(true);
        }
        if let Some(child_id) = &child.rule_id
            && !visited.insert(child_id.clone())
        {
            continue;
        }
        if contains_rule_id_inner(child, rule_id, registry, depth - 1, visited)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Replace every registry entry declaring `folderRecursionLimit` with its
/// unrolled form: `limit` nested copies of itself, the innermost copy
/// holding a childless rule of the same name in place of the self-reference.
///
/// Entries without a limit (or with a limit of 0) are kept as written.
///
/// # Errors
/// - [`LayoutGuardError::FolderRecursionLimitTooLarge`] for a limit above
///   [`RECURSION_LIMIT`].
/// - Resolution errors of the unrolled subtrees.
pub fn unroll_folder_recursion(registry: &RuleRegistry) -> Result<RuleRegistry> {
    let without_limits: RuleRegistry = registry
        .iter()
        .map(|(id, rule)| {
            let mut rule = rule.clone();
            rule.folder_recursion_limit = None;
            (id.clone(), rule)
        })
        .collect();

    let mut unrolled = RuleRegistry::with_capacity(registry.len());
    for (rule_id, rule) in registry {
        let declared = resolve_rule(rule, registry)?.folder_recursion_limit;
        let Some(limit) = declared.filter(|limit| *limit > 0) else {
            unrolled.insert(rule_id.clone(), rule.clone());
            continue;
        };
        if limit > RECURSION_LIMIT {
            return Err(LayoutGuardError::FolderRecursionLimitTooLarge {
                rule_id: rule_id.clone(),
                declared: limit,
                limit: RECURSION_LIMIT,
            });
        }

        tracing::debug!(rule_id, limit, "unrolling folder recursion");
        let unroller = Unroller {
            rule_id,
            registry: &without_limits,
        };
        let mut expanded = unroller.unroll(rule, limit, 0)?;
        // The materialized levels now carry the limit.
        expanded.folder_recursion_limit = None;
        unrolled.insert(rule_id.clone(), expanded);
    }
    Ok(unrolled)
}

struct Unroller<'a> {
    rule_id: &'a str,
    registry: &'a RuleRegistry,
}

impl Unroller<'_> {
    /// Once the remaining depth is used up, the rule becomes terminal: its
    /// name without children, so nothing can nest below it.
    fn unroll(&self, rule: &Rule, remaining: usize, depth: usize) -> Result<Rule> {
        if depth >= RECURSION_LIMIT {
            return Err(LayoutGuardError::RecursionLimitExceeded(
                self.rule_id.to_string(),
            ));
        }
        let mut resolved = resolve_rule(rule, self.registry)?;
        if remaining == 0 {
            return Ok(Rule {
                name: resolved.name,
                ..Rule::default()
            });
        }
        let Some(children) = resolved.children.take() else {
            return Ok(resolved);
        };

        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            if child.rule_id.as_deref() == Some(self.rule_id) {
                kept.push(self.unroll(&child, remaining - 1, depth + 1)?);
            } else if contains_rule_id(&child, self.rule_id, self.registry)? {
                kept.push(self.unroll(&child, remaining, depth + 1)?);
            } else {
                kept.push(child);
            }
        }
        resolved.children = Some(kept);
        Ok(resolved)
    }
}

/// Ordering used when listing allowed names: literal names, then wildcard
/// names, then regex-bearing names, then a bare `*`; folders before files.
#[must_use]
pub fn sort_for_display(rules: &[Rule]) -> Vec<&Rule> {
    let mut sorted: Vec<&Rule> = rules.iter().filter(|rule| rule.name.is_some()).collect();
    sorted.sort_by_key(|rule| display_rank(rule));
    sorted
}

fn display_rank(rule: &Rule) -> (u8, u8) {
    let name = rule.name.as_deref().unwrap_or_default();
    let specificity = if name == "*" {
        3
    } else if name.contains(['{', '(', '[', '|', '+', '?', '^', '$', '\\']) {
        2
    } else if name.contains('*') {
        1
    } else {
        0
    };
    (specificity, u8::from(!rule.is_folder()))
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
