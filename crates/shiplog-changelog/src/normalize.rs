//! Display title normalization

use regex::Regex;
use std::sync::LazyLock;

/// Leading conventional-commit token: `type(scope)!:` or `type ` forms
static PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:breaking|refactor|chore|build|style|test|perf|feat|fix|docs?|ci)(?:\([^)]*\))?!?[:\s]\s*",
    )
    .expect("Invalid regex")
});

/// Trailing pull-request back-reference: `(#123)`
static PR_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(#\d+\)\s*$").expect("Invalid regex"));

/// Normalize a raw title for display.
///
/// Strips leading conventional-commit tokens and trailing `(#N)` references
/// to a fixpoint, trims, and capitalizes the first character. Idempotent:
/// normalizing an already-normalized title returns it unchanged.
pub fn normalize_title(raw: &str) -> String {
    capitalize(&stripped_title(raw))
}

/// Stripped but uncapitalized form, for callers that re-prefix the title
pub(crate) fn stripped_title(raw: &str) -> String {
    let mut title = raw.trim().to_string();

    loop {
        let stripped = PREFIX_REGEX.replace(&title, "");
        let stripped = PR_SUFFIX_REGEX.replace(&stripped, "");
        let next = stripped.trim().to_string();
        if next == title || next.is_empty() {
            break;
        }
        title = next;
    }

    title
}

/// Uppercase the first character, leaving the rest untouched
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
