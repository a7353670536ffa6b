use std::collections::BTreeSet;
use std::fmt;

use super::results::RejectionReason;
use super::results::ValidationResult;

const MARKUP_MARKERS: &[&str] = &["<script", "<iframe"];

const COMMENT_MARKERS: &[&str] = &["--", "/*", "*/"];

const KEYWORD_MARKERS: &[&str] = &[
    "drop table",
    "drop database",
    "truncate table",
    "delete from",
    "insert into",
    "union select",
    "exec(",
    "xp_cmdshell",
];

const TAUTOLOGY_MARKERS: &[&str] = &["' or '", "' or 1=1", "\" or \""];

const QUOTES: &[char] = &['\'', '"', '`'];

/// Sequences that end a statement or open a comment when they follow a quote.
const STATEMENT_BREAKS: &[&str] = &[";", "--", "#", "/*"];

/// Punctuation accepted on top of alphanumeric characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedCharacters(BTreeSet<char>);

impl AllowedCharacters {
    /// Build an allow-set from every character of `chars`.
    pub fn new(chars: &str) -> Self {
        Self(chars.chars().collect())
    }

    /// Empty allow-set: only alphanumeric input passes.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }
}

impl fmt::Display for AllowedCharacters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

/// Classifies untrusted field values as accepted or rejected.
///
/// A blocklist/allowlist hybrid guarding the username, email and password
/// fields. It is a defense-in-depth layer only: it does not parse markup or
/// SQL, can be bypassed by encodings it does not know about, and does not
/// replace parameterised queries or output encoding downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an optional field value.
    ///
    /// Absent or empty input is accepted; required-field checks belong to
    /// the caller. Otherwise the markup, query-structure and allowlist
    /// rules run in that order and the first failure is reported.
    ///
    /// # Arguments
    /// * `input` - Raw field value
    /// * `allowed` - Punctuation permitted in addition to alphanumerics
    pub fn validate(&self, input: Option<&str>, allowed: &AllowedCharacters) -> ValidationResult {
        match input {
            None => ValidationResult::Accepted,
            Some(value) => self.validate_str(value, allowed),
        }
    }

    /// Validate a present field value. See [`InputValidator::validate`].
    pub fn validate_str(&self, input: &str, allowed: &AllowedCharacters) -> ValidationResult {
        if input.is_empty() {
            return ValidationResult::Accepted;
        }

        let normalized = normalize(input);

        if contains_markup_marker(&normalized) {
            return ValidationResult::Rejected(RejectionReason::MarkupInjection);
        }

        if contains_query_marker(&normalized) {
            return ValidationResult::Rejected(RejectionReason::QueryInjection);
        }

        match input
            .chars()
            .find(|c| !c.is_alphanumeric() && !allowed.contains(*c))
        {
            Some(c) => ValidationResult::Rejected(RejectionReason::DisallowedCharacter(c)),
            None => ValidationResult::Accepted,
        }
    }
}

/// Lowercase and collapse whitespace runs into a single space.
fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_markup_marker(normalized: &str) -> bool {
    MARKUP_MARKERS.iter().any(|m| normalized.contains(m))
}

fn contains_query_marker(normalized: &str) -> bool {
    COMMENT_MARKERS
        .iter()
        .chain(KEYWORD_MARKERS)
        .chain(TAUTOLOGY_MARKERS)
        .any(|m| normalized.contains(m))
        || has_quote_followed_by_break(normalized)
}

fn has_quote_followed_by_break(normalized: &str) -> bool {
    normalized
        .match_indices(|c: char| QUOTES.contains(&c))
        .any(|(index, quote)| {
            let rest = normalized
                .get(index + quote.len()..)
                .unwrap_or_default()
                .trim_start();
            STATEMENT_BREAKS.iter().any(|b| rest.starts_with(b))
        })
}
