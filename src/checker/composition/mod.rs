//! File composition validation.
//!
//! [`FileCompositionChecker`] applies the first `filesRules` entry whose
//! `filePattern` matches a file to that file's declarations:
//! - which selector kinds may appear in each scope (export, root, nested),
//! - the naming formats of each selector,
//! - the position of top-level declarations,
//! - how many of each selector the file root may hold.

mod declarations;
mod format;
mod limits;
mod position;
pub mod syntax;
pub mod violation;

use std::path::{Path, PathBuf};

use crate::config::{
    AllowOnlySpecifiedSelectors, FileCompositionConfig, FilesRule, PositionIndex, Scope,
    ScopePermission, SelectorKind, SelectorRule,
};
use crate::diagnostic::{Location, SwapFix};
use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::path_utils::{normalize, relative_to};
use crate::pattern::CompiledPattern;
use crate::reference::{RegexCache, RegexParameters};

pub use syntax::SyntaxFile;
pub use violation::{CompositionDiagnostic, CompositionViolation, ExceededLimit};

use declarations::{DESTRUCTURED_NAME, Declaration, Placement, collect};
use format::{NameFormat, rule_matches};
use limits::check_root_limits;
use position::{PositionRule, body_entries, sort_entries, target_slot};

/// Per-file state shared by every declaration check.
struct FileContext<'a> {
    file_name: &'a str,
    files_rule: &'a FilesRule,
    body: Vec<&'a syntax::Node>,
}

/// Validator for file composition rules.
pub struct FileCompositionChecker {
    project_root: PathBuf,
    files_rules: Vec<(CompiledPattern, FilesRule)>,
    regex_parameters: RegexParameters,
    regexes: RegexCache,
}

impl FileCompositionChecker {
    /// # Errors
    /// Returns an error if a `filePattern` is not a valid glob or the current
    /// directory is needed and unavailable.
    pub fn new(config: &FileCompositionConfig, fs: &dyn FileSystem) -> Result<Self> {
        let project_root = if config.project_root.is_absolute() {
            normalize(&config.project_root)
        } else {
            normalize(&fs.current_dir()?.join(&config.project_root))
        };
        let files_rules = config
            .files_rules
            .iter()
            .map(|rule| Ok((CompiledPattern::new(&rule.file_pattern)?, rule.clone())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            project_root,
            files_rules,
            regex_parameters: config.regex_parameters.clone(),
            regexes: RegexCache::new(),
        })
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// First files-rule whose pattern matches `file`.
    #[must_use]
    pub fn files_rule(&self, file: &Path) -> Option<&FilesRule> {
        let relative = relative_to(&self.absolute(file), &self.project_root);
        self.files_rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(&relative))
            .map(|(_, rule)| rule)
    }

    /// Validate the declarations of `file`.
    ///
    /// # Errors
    /// Returns a configuration error (bad regex, unknown reference, ...).
    /// Validation failures are returned as diagnostics.
    pub fn check(&self, file: &Path, syntax: &SyntaxFile) -> Result<Vec<CompositionDiagnostic>> {
        let Some(files_rule) = self.files_rule(file) else {
            tracing::debug!(file = %file.display(), "no filesRules entry matches");
            return Ok(Vec::new());
        };
        let absolute = self.absolute(file);
        let file_name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut diagnostics = Vec::new();
        if let Some(violation) = check_root_limits(&syntax.body, &files_rule.root_selectors_limits)
        {
            diagnostics.push(CompositionDiagnostic {
                violation,
                location: Location::File,
            });
        }

        let context = FileContext {
            file_name: &file_name,
            files_rule,
            body: syntax.body_without_imports(),
        };
        for declaration in collect(syntax) {
            self.check_declaration(&context, &declaration, &mut diagnostics)?;
        }
        Ok(diagnostics)
    }

    fn check_declaration(
        &self,
        context: &FileContext<'_>,
        declaration: &Declaration<'_>,
        out: &mut Vec<CompositionDiagnostic>,
    ) -> Result<()> {
        let scope = match (declaration.export, declaration.placement) {
            (Some(_), _) => Scope::FileExport,
            (None, Placement::Root { .. }) => Scope::FileRoot,
            (None, Placement::Nested) => Scope::NestedSelectors,
        };
        let rules: Vec<&SelectorRule> = context
            .files_rule
            .rules
            .iter()
            .filter(|rule| applies_to_scope(rule, scope))
            .collect();

        let (name, span) = match declaration.export {
            Some(binding) => (binding.name, binding.span),
            None => (declaration.name, declaration.span),
        };

        if let Some(violation) = self.prohibited(context.files_rule, &rules, scope, declaration)? {
            out.push(CompositionDiagnostic {
                violation,
                location: span.location(),
            });
            return Ok(());
        }
        if rules.is_empty() || name == DESTRUCTURED_NAME {
            return Ok(());
        }

        let mut any_valid = false;
        let mut rejected_formats = Vec::new();
        let mut matched_rules = 0;
        for rule in rules {
            if !rule_matches(rule, declaration.kind, declaration.expression_name, &self.regexes)? {
                continue;
            }
            matched_rules += 1;
            let format = NameFormat::for_rule(rule, context.file_name, &self.regex_parameters)?;
            if !format.accepts(name, &self.regexes)? {
                rejected_formats.extend(format.display);
                continue;
            }
            any_valid = true;
            if let (Some(position_index), Placement::Root { statement }) =
                (rule.position_index, declaration.placement)
                && let Some(diagnostic) =
                    self.check_position(context, declaration, position_index, statement)?
            {
                out.push(diagnostic);
            }
        }

        if matched_rules > 0 && !any_valid {
            tracing::debug!(name, selector = %declaration.kind, "name rejected by every rule");
            out.push(CompositionDiagnostic {
                violation: CompositionViolation::InvalidName {
                    selector: declaration.kind,
                    formats: rejected_formats,
                },
                location: span.location(),
            });
        }
        Ok(())
    }

    /// Selector permission per `allowOnlySpecifiedSelectors`.
    fn prohibited(
        &self,
        files_rule: &FilesRule,
        rules: &[&SelectorRule],
        scope: Scope,
        declaration: &Declaration<'_>,
    ) -> Result<Option<CompositionViolation>> {
        let permission = match &files_rule.allow_only_specified_selectors {
            None | Some(AllowOnlySpecifiedSelectors::Flag(false)) => return Ok(None),
            Some(permission) => permission,
        };
        if let AllowOnlySpecifiedSelectors::Scoped(scoped) = permission
            && scoped.for_scope(scope) == Some(&ScopePermission::Flag(false))
        {
            return Ok(None);
        }
        for rule in rules {
            if rule_matches(rule, declaration.kind, declaration.expression_name, &self.regexes)? {
                return Ok(None);
            }
        }
        Ok(Some(CompositionViolation::ProhibitedSelector {
            scope,
            selector: declaration.kind,
            custom_error: custom_error(permission, scope, declaration.kind),
        }))
    }

    fn check_position(
        &self,
        context: &FileContext<'_>,
        declaration: &Declaration<'_>,
        position_index: PositionIndex,
        current: usize,
    ) -> Result<Option<CompositionDiagnostic>> {
        let position_rules = context
            .files_rule
            .rules
            .iter()
            .filter_map(|rule| {
                let index = rule.position_index?.index();
                Some(
                    NameFormat::for_rule(rule, context.file_name, &self.regex_parameters).map(
                        |format| PositionRule {
                            index,
                            selectors: rule.selector.as_slice(),
                            regexes: format.regexes,
                        },
                    ),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let mut entries = body_entries(&context.body);
        sort_entries(&mut entries, position_index.sorting());

        let mut ranked = Vec::new();
        for entry in &entries {
            for rule in &position_rules {
                if self.position_rule_matches(rule, entry)? {
                    ranked.push((rule.index, entry.range));
                    break;
                }
            }
        }

        let target = target_slot(&ranked, declaration.span.range(), context.body.len());
        if target == current {
            return Ok(None);
        }
        let (Some(target_node), Some(current_node)) =
            (context.body.get(target), context.body.get(current))
        else {
            tracing::debug!(target, current, "position outside of the file body");
            return Ok(None);
        };
        let (target_span, current_span) = (target_node.span(), current_node.span());
        Ok(Some(CompositionDiagnostic {
            violation: CompositionViolation::InvalidPosition {
                selector: declaration.kind,
                current_line: current_span.line,
                correct_line: target_span.line,
                fix: SwapFix {
                    first: target_span.range(),
                    second: current_span.range(),
                },
            },
            location: declaration.span.location(),
        }))
    }

    fn position_rule_matches(
        &self,
        rule: &PositionRule<'_>,
        entry: &position::BodyEntry<'_>,
    ) -> Result<bool> {
        let mut selector_matches = false;
        for selector in rule.selectors {
            if format::selector_matches(selector, entry.kind, entry.expression_name, &self.regexes)? {
                selector_matches = true;
                break;
            }
        }
        if !selector_matches {
            return Ok(false);
        }
        for regex in &rule.regexes {
            if self.regexes.is_match(regex, entry.name)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn absolute(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            normalize(file)
        } else {
            normalize(&self.project_root.join(file))
        }
    }
}

/// A rule without `scope`, or with `file`, applies to every scope.
fn applies_to_scope(rule: &SelectorRule, scope: Scope) -> bool {
    rule.scope.as_ref().is_none_or(|scopes| {
        scopes
            .as_slice()
            .iter()
            .any(|s| *s == scope || *s == Scope::File)
    })
}

/// Custom text for a prohibited selector, wrapped in blank lines.
///
/// A scope-level error map overrides the shared `error` map.
fn custom_error(
    permission: &AllowOnlySpecifiedSelectors,
    scope: Scope,
    kind: SelectorKind,
) -> String {
    let AllowOnlySpecifiedSelectors::Scoped(scoped) = permission else {
        return String::new();
    };
    let text = match scoped.for_scope(scope) {
        Some(ScopePermission::Errors(errors)) => {
            errors.get(&kind).or_else(|| scoped.error.get(&kind))
        }
        _ => scoped.error.get(&kind),
    };
    text.filter(|text| !text.is_empty())
        .map(|text| format!("\n\n{text}\n\n"))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
