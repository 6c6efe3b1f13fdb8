//! Naming-convention conversion and the regex fragments that describe each
//! convention.
//!
//! [`transform`] rewrites an identifier into a target [`Case`]. The
//! `*_REGEX` constants are the canonical fragments that placeholders such as
//! `{camelCase}` expand to inside name formats.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub const SNAKE_CASE_LOWER_REGEX: &str = r"((([a-z]|\d)+_)*([a-z]|\d)+)";
pub const SNAKE_CASE_UPPER_REGEX: &str = r"((([A-Z]|\d)+_)*([A-Z]|\d)+)";
pub const KEBAB_CASE_REGEX: &str = r"((([a-z]|\d)+-)*([a-z]|\d)+)";
pub const CAMEL_CASE_REGEX: &str = r"([a-z]+[A-Z0-9]*[A-Z0-9]*)*";
pub const PASCAL_CASE_REGEX: &str = r"([A-Z]+[a-z0-9]*[A-Z0-9]*)*";
pub const STRICT_CAMEL_CASE_REGEX: &str =
    r"[a-z][a-z0-9]*(([A-Z][a-z0-9]+)*[A-Z]?|([a-z0-9]+[A-Z])*|[A-Z])";
pub const STRICT_PASCAL_CASE_REGEX: &str = r"[A-Z](([a-z0-9]+[A-Z]?)*)";

/// Regex fragments available as `{name}` references in every name format.
pub const CASE_REGEX_PARAMETERS: [(&str, &str); 7] = [
    ("camelCase", CAMEL_CASE_REGEX),
    ("PascalCase", PASCAL_CASE_REGEX),
    ("strictCamelCase", STRICT_CAMEL_CASE_REGEX),
    ("StrictPascalCase", STRICT_PASCAL_CASE_REGEX),
    ("snake_case", SNAKE_CASE_LOWER_REGEX),
    ("SNAKE_CASE", SNAKE_CASE_UPPER_REGEX),
    ("kebab-case", KEBAB_CASE_REGEX),
];

/// Target naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    #[serde(rename = "camelCase")]
    Camel,
    #[serde(rename = "PascalCase")]
    Pascal,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "SNAKE_CASE")]
    ScreamingSnake,
    #[serde(rename = "kebab-case")]
    Kebab,
}

impl Case {
    pub const ALL: [Self; 5] = [
        Self::Camel,
        Self::Pascal,
        Self::Snake,
        Self::ScreamingSnake,
        Self::Kebab,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Camel => "camelCase",
            Self::Pascal => "PascalCase",
            Self::Snake => "snake_case",
            Self::ScreamingSnake => "SNAKE_CASE",
            Self::Kebab => "kebab-case",
        }
    }

    /// Regex fragment matching any string already written in this convention.
    #[must_use]
    pub const fn regex(self) -> &'static str {
        match self {
            Self::Camel => CAMEL_CASE_REGEX,
            Self::Pascal => PASCAL_CASE_REGEX,
            Self::Snake => SNAKE_CASE_LOWER_REGEX,
            Self::ScreamingSnake => SNAKE_CASE_UPPER_REGEX,
            Self::Kebab => KEBAB_CASE_REGEX,
        }
    }

    /// Converts `input` into this convention.
    #[must_use]
    pub fn apply(self, input: &str) -> String {
        transform(input, self)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|case| case.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown case '{s}'. Expected one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                )
            })
    }
}

static SEPARATED_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-_][a-z]").expect("valid regex"));
static UNDERSCORE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[a-z]").expect("valid regex"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));
static LETTER_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z])(\d)").expect("valid regex"));
static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([A-Za-z])").expect("valid regex"));
static DASH_OR_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]").expect("valid regex"));
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));
static LOWER_THEN_UPPER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z]+)").expect("valid regex"));
static ACRONYM_THEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));
static UNDERSCORE_OR_SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\s]+").expect("valid regex"));

/// Converts `input` into the `target` naming convention.
#[must_use]
pub fn transform(input: &str, target: Case) -> String {
    match target {
        Case::Camel => to_camel_case(input),
        Case::Pascal => upper_first(&to_camel_case(input)),
        Case::Snake => to_snake_case(input),
        Case::ScreamingSnake => to_snake_case(input).to_uppercase(),
        Case::Kebab => to_kebab_case(input),
    }
}

fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            first.to_ascii_lowercase().to_string() + chars.as_str()
        }
        _ => text.to_string(),
    }
}

fn to_camel_case(input: &str) -> String {
    // An all-uppercase input is a single shouty token.
    if input == input.to_uppercase() {
        let lowered = input.to_lowercase();
        let joined = UNDERSCORE_LETTER.replace_all(&lowered, |caps: &Captures<'_>| {
            caps[0].to_uppercase()
        });
        return lower_first(&joined).replace('_', "");
    }

    let joined = SEPARATED_LETTER.replace_all(input, |caps: &Captures<'_>| {
        caps[0].to_uppercase().replace(['-', '_'], "")
    });
    lower_first(&joined).replace('_', "")
}

fn to_snake_case(input: &str) -> String {
    let text = LOWER_UPPER.replace_all(input, "${1}_${2}");
    let text = LETTER_DIGIT.replace_all(&text, "${1}_${2}");
    let text = DIGIT_LETTER.replace_all(&text, "${1}_${2}");
    let text = DASH_OR_SPACE.replace_all(&text, "_");
    UNDERSCORE_RUN.replace_all(&text, "_").to_lowercase()
}

fn to_kebab_case(input: &str) -> String {
    let text = LOWER_THEN_UPPER_RUN.replace_all(input, |caps: &Captures<'_>| {
        format!("{}-{}", &caps[1], caps[2].to_lowercase())
    });
    let text = ACRONYM_THEN_WORD.replace_all(&text, |caps: &Captures<'_>| {
        format!("{}-{}", caps[1].to_lowercase(), &caps[2])
    });
    let text = DIGIT_LETTER.replace_all(&text, |caps: &Captures<'_>| {
        format!("{}-{}", &caps[1], caps[2].to_lowercase())
    });
    let text = LETTER_DIGIT.replace_all(&text, "${1}-${2}");
    UNDERSCORE_OR_SPACE_RUN
        .replace_all(&text, "-")
        .to_lowercase()
}

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;
