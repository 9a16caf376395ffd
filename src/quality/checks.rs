/*!
 * Individual quality checks for a source/target pair.
 *
 * Each check compares one translation with its source and reports at most one
 * [`Issue`]. Placeholder, markup and number checks compare multisets, so a
 * reordered translation passes while a dropped or duplicated token does not.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::issues::{Issue, IssueKind, Severity};

/// Interpolation placeholders: `{{var}}`, `${var}`, `{name}`, `{0}`, `%s`, `%1$d`, `%@`
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*[\w.\-]+\s*\}\}|\$\{[\w.\-]+\}|\{[\w.\-]*\}|%(?:\d+\$)?[-+0#]*\d*(?:\.\d+)?[sdifuxXeEgGc@]")
        .expect("Invalid placeholder regex")
});

/// HTML/XML style tags
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][\w:\-]*)(?:\s[^<>]*?)?(/?)>").expect("Invalid tag regex")
});

/// Digit runs, allowing inner separators (`1,000.50`)
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,\u{a0}\u{202f}']\d+)*").expect("Invalid number regex")
});

/// Sources shorter than this (in chars) skip the length ratio check
const MIN_SOURCE_LEN_FOR_RATIO: usize = 4;

/// A required translation for a source term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// Term as it appears in source text
    pub source: String,
    /// Required rendering in the translation
    pub target: String,
    /// Match case exactly
    #[serde(default)]
    pub case_sensitive: bool,
}

impl GlossaryTerm {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            case_sensitive: false,
        }
    }
}

fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    items.sort();
    items
}

/// Placeholders in order of appearance
pub fn extract_placeholders(text: &str) -> Vec<String> {
    let text = text.replace("%%", "");
    PLACEHOLDER_REGEX
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tags normalised to `<name>`, `</name>` or `<name/>`, in order of appearance
pub fn extract_tags(text: &str) -> Vec<String> {
    TAG_REGEX
        .captures_iter(text)
        .map(|c| {
            let closing = &c[1];
            let name = c[2].to_lowercase();
            let self_closing = &c[3];
            format!("<{}{}{}>", closing, name, self_closing)
        })
        .collect()
}

/// Numbers with separators stripped, ignoring digits inside placeholders
pub fn extract_numbers(text: &str) -> Vec<String> {
    let without_placeholders = PLACEHOLDER_REGEX.replace_all(text, " ");
    NUMBER_REGEX
        .find_iter(&without_placeholders)
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())
        .collect()
}

fn describe_difference(expected: &[String], actual: &[String]) -> String {
    let mut missing: Vec<&String> = Vec::new();
    let mut remaining: Vec<&String> = actual.iter().collect();
    for item in expected {
        if let Some(pos) = remaining.iter().position(|a| *a == item) {
            remaining.remove(pos);
        } else {
            missing.push(item);
        }
    }

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!(
            "missing {}",
            missing.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" ")
        ));
    }
    if !remaining.is_empty() {
        parts.push(format!(
            "unexpected {}",
            remaining.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" ")
        ));
    }
    parts.join(", ")
}

/// Target absent or blank
pub fn check_missing(key: &str, target: Option<&str>) -> Option<Issue> {
    match target {
        Some(t) if !t.trim().is_empty() => None,
        _ => Some(Issue::new(key, IssueKind::MissingTranslation, "Translation is missing or empty")),
    }
}

/// Placeholder multisets must match
pub fn check_placeholders(key: &str, source: &str, target: &str) -> Option<Issue> {
    let expected = sorted(extract_placeholders(source));
    let actual = sorted(extract_placeholders(target));
    if expected == actual {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::PlaceholderMismatch,
        format!("Placeholder mismatch: {}", describe_difference(&expected, &actual)),
    ))
}

/// Tag multisets must match
pub fn check_markup(key: &str, source: &str, target: &str) -> Option<Issue> {
    let expected = sorted(extract_tags(source));
    let actual = sorted(extract_tags(target));
    if expected == actual {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::MarkupMismatch,
        format!("Markup mismatch: {}", describe_difference(&expected, &actual)),
    ))
}

/// Number multisets must match
pub fn check_numbers(key: &str, source: &str, target: &str) -> Option<Issue> {
    let expected = sorted(extract_numbers(source));
    let actual = sorted(extract_numbers(target));
    if expected == actual {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::NumberMismatch,
        format!("Number mismatch: {}", describe_difference(&expected, &actual)),
    ))
}

fn contains_term(text: &str, term: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text.contains(term)
    } else {
        text.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Every glossary term found in the source must appear in its required form
pub fn check_glossary(key: &str, source: &str, target: &str, glossary: &[GlossaryTerm]) -> Option<Issue> {
    let violations: Vec<String> = glossary
        .iter()
        .filter(|term| !term.source.is_empty())
        .filter(|term| contains_term(source, &term.source, term.case_sensitive))
        .filter(|term| !contains_term(target, &term.target, term.case_sensitive))
        .map(|term| format!("'{}' should be translated as '{}'", term.source, term.target))
        .collect();

    if violations.is_empty() {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::GlossaryViolation,
        format!("Glossary violation: {}", violations.join("; ")),
    ))
}

/// Target/source character ratio must stay within `[min_ratio, max_ratio]`.
///
/// Ratios beyond twice the bound (or below half of it) escalate to medium.
pub fn check_length_ratio(
    key: &str,
    source: &str,
    target: &str,
    min_ratio: f64,
    max_ratio: f64,
) -> Option<Issue> {
    let source_len = source.trim().chars().count();
    if source_len < MIN_SOURCE_LEN_FOR_RATIO {
        return None;
    }
    let target_len = target.trim().chars().count();
    let ratio = target_len as f64 / source_len as f64;

    let (message, far_off) = if ratio < min_ratio {
        (
            format!(
                "Translation too short: ratio {:.2} < {:.2} ({} -> {} chars)",
                ratio, min_ratio, source_len, target_len
            ),
            ratio < min_ratio / 2.0,
        )
    } else if ratio > max_ratio {
        (
            format!(
                "Translation too long: ratio {:.2} > {:.2} ({} -> {} chars)",
                ratio, max_ratio, source_len, target_len
            ),
            ratio > max_ratio * 2.0,
        )
    } else {
        return None;
    };

    let issue = Issue::new(key, IssueKind::LengthRatio, message);
    Some(if far_off { issue.with_severity(Severity::Medium) } else { issue })
}

/// Target must fit within an absolute character limit
pub fn check_max_length(key: &str, target: &str, max_length: usize) -> Option<Issue> {
    let len = target.chars().count();
    if len <= max_length {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::MaxLengthExceeded,
        format!("Translation has {} chars, limit is {}", len, max_length),
    ))
}

/// Target identical to a source that contains letters
pub fn check_untranslated_copy(key: &str, source: &str, target: &str) -> Option<Issue> {
    let source = source.trim();
    let letters = source.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 || source != target.trim() {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::UntranslatedCopy,
        "Translation is identical to the source",
    ))
}

/// Leading and trailing whitespace must match the source
pub fn check_whitespace(key: &str, source: &str, target: &str) -> Option<Issue> {
    let leading = |s: &str| s.starts_with(char::is_whitespace);
    let trailing = |s: &str| s.ends_with(char::is_whitespace);

    let mut problems = Vec::new();
    if leading(source) != leading(target) {
        problems.push("leading");
    }
    if trailing(source) != trailing(target) {
        problems.push("trailing");
    }
    if problems.is_empty() {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::WhitespaceMismatch,
        format!("Whitespace mismatch: {} whitespace differs from source", problems.join(" and ")),
    ))
}

/// Class of sentence-final punctuation, with full-width forms folded in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalPunctuation {
    Period,
    Exclamation,
    Question,
    Colon,
    Ellipsis,
    None,
}

/// Classify the last visible character of a text
pub fn terminal_punctuation(text: &str) -> TerminalPunctuation {
    let trimmed = text.trim_end();
    if trimmed.ends_with("...") || trimmed.ends_with('…') {
        return TerminalPunctuation::Ellipsis;
    }
    match trimmed.chars().last() {
        Some('.' | '。' | '．' | '।' | '۔') => TerminalPunctuation::Period,
        Some('!' | '！') => TerminalPunctuation::Exclamation,
        Some('?' | '？' | '؟') => TerminalPunctuation::Question,
        Some(':' | '：') => TerminalPunctuation::Colon,
        _ => TerminalPunctuation::None,
    }
}

/// Sentence-final punctuation class must match the source
pub fn check_punctuation(key: &str, source: &str, target: &str) -> Option<Issue> {
    let expected = terminal_punctuation(source);
    let actual = terminal_punctuation(target);
    if expected == actual {
        return None;
    }
    Some(Issue::new(
        key,
        IssueKind::PunctuationMismatch,
        format!("Ending punctuation differs: source {:?}, translation {:?}", expected, actual),
    ))
}
