use crate::config::{OneOrMany, Selector, SelectorKind, SelectorRule};
use crate::error::Result;
use crate::path_utils::strip_last_extension;
use crate::reference::{
    FILE_NAME_REFERENCES, ReferenceContext, RegexCache, RegexParameters, expand, name_parameters,
    substitute_name_references, wildcard_to_regex,
};

pub(super) const DEFAULT_FORMAT: &str = "{camelCase}";

/// File name without its last extension and without `filenamePartsToRemove`.
pub(super) fn file_name_base(file_name: &str, parts_to_remove: Option<&OneOrMany<String>>) -> String {
    let base = strip_last_extension(file_name).to_string();
    parts_to_remove
        .map(OneOrMany::as_slice)
        .unwrap_or_default()
        .iter()
        .fold(base, |acc, part| acc.replace(part.as_str(), ""))
}

/// The formats of one selector rule, prepared for a given file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct NameFormat {
    /// Regex sources, unanchored.
    pub regexes: Vec<String>,
    /// Formats with `{fileName}` and friends substituted, for messages.
    pub display: Vec<String>,
}

impl NameFormat {
    pub fn for_rule(rule: &SelectorRule, file_name: &str, user: &RegexParameters) -> Result<Self> {
        let base = file_name_base(file_name, rule.filename_parts_to_remove.as_ref());
        let formats: Vec<&str> = rule.format.as_ref().map_or_else(
            || vec![DEFAULT_FORMAT],
            |format| format.as_slice().iter().map(String::as_str).collect(),
        );
        let parameters = name_parameters(user, &FILE_NAME_REFERENCES, &base);

        let regexes = formats
            .iter()
            .map(|format| {
                expand(
                    &wildcard_to_regex(format),
                    &parameters,
                    "format",
                    &ReferenceContext::none(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let display = formats
            .iter()
            .map(|format| substitute_name_references(format, &FILE_NAME_REFERENCES, &base))
            .collect();
        Ok(Self { regexes, display })
    }

    pub fn accepts(&self, name: &str, regexes: &RegexCache) -> Result<bool> {
        for regex in &self.regexes {
            if regexes.is_match(regex, name)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// True when `selector` targets a declaration of `kind`.
///
/// Expression selectors additionally require the initializer's root
/// identifier to match one of `limitTo`.
pub(super) fn selector_matches(
    selector: &Selector,
    kind: SelectorKind,
    expression_name: Option<&str>,
    regexes: &RegexCache,
) -> Result<bool> {
    match selector {
        Selector::Kind(selector_kind) => Ok(*selector_kind == kind),
        Selector::Expression(expression) => {
            let Some(expression_name) = expression_name else {
                return Ok(false);
            };
            if expression.kind != kind {
                return Ok(false);
            }
            for limit in expression.limit_to.as_slice() {
                if regexes.is_match(&wildcard_to_regex(limit), expression_name)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// True when any selector of `rule` targets the declaration.
pub(super) fn rule_matches(
    rule: &SelectorRule,
    kind: SelectorKind,
    expression_name: Option<&str>,
    regexes: &RegexCache,
) -> Result<bool> {
    for selector in rule.selector.as_slice() {
        if selector_matches(selector, kind, expression_name, regexes)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
