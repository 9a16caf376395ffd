use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for locale codes found in translation files
///
/// Files and configs carry ISO 639-1 (`de`), ISO 639-2/T (`deu`),
/// ISO 639-2/B (`ger`) codes and BCP 47-style locale tags (`de-AT`, `pt_BR`).
/// Only the primary language subtag is validated; region and script subtags
/// are kept by callers but ignored for matching.

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Lowercased primary subtag of a locale tag (`pt_BR` -> `pt`)
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

fn lookup(primary: &str) -> Option<(Language, LanguageCodeType)> {
    match primary.len() {
        2 => Language::from_639_1(primary).map(|l| (l, LanguageCodeType::Part1)),
        3 => {
            if let Some(lang) = Language::from_639_3(primary) {
                return Some((lang, LanguageCodeType::Part2T));
            }
            bibliographic_to_terminology(primary)
                .and_then(Language::from_639_3)
                .map(|l| (l, LanguageCodeType::Part2B))
        }
        _ => None,
    }
}

/// Validate a language code or locale tag
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    lookup(&primary_subtag(code))
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize to ISO 639-1 when one exists, otherwise ISO 639-3
pub fn normalize_to_part1_or_part3(code: &str) -> Result<String> {
    let (lang, _) = lookup(&primary_subtag(code))
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two codes name the same language, ignoring region subtags
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(&primary_subtag(code1)), lookup(&primary_subtag(code2))) {
        (Some((a, _)), Some((b, _))) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let (lang, _) = lookup(&primary_subtag(code))
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
