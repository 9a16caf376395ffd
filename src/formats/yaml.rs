/*!
 * YAML translation files.
 *
 * Two shapes are accepted:
 * - a sequence of `{key, source, target, note}` records (bilingual)
 * - a nested mapping of strings (monolingual locale file), flattened to
 *   dotted keys; a single top-level language key (`en:`) is unwrapped and
 *   recorded as the file's language
 */

use log::debug;
use serde_yaml::{Mapping, Value};

use super::{FileFormat, TranslationFile, TranslationUnit};
use crate::errors::FormatError;
use crate::language_utils;

const FORMAT: &str = "YAML";

/// Parse YAML content
pub fn parse(content: &str) -> Result<TranslationFile, FormatError> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| FormatError::parse(FORMAT, e))?;

    match value {
        Value::Null => Ok(TranslationFile::new(FileFormat::Yaml, Vec::new())),
        Value::Sequence(_) => {
            let units: Vec<TranslationUnit> =
                serde_yaml::from_value(value).map_err(|e| FormatError::parse(FORMAT, e))?;
            Ok(TranslationFile::new(FileFormat::Yaml, units))
        }
        Value::Mapping(mapping) => Ok(parse_locale_mapping(mapping)),
        other => Err(FormatError::parse(
            FORMAT,
            format!("expected a mapping or a sequence, found {:?}", other),
        )),
    }
}

fn parse_locale_mapping(mut mapping: Mapping) -> TranslationFile {
    let language = language_root(&mapping);

    let root = match &language {
        Some(code) => {
            debug!("Unwrapping top-level language key '{}'", code);
            mapping.remove(code.as_str()).unwrap_or(Value::Null)
        }
        None => Value::Mapping(mapping),
    };

    let mut units = Vec::new();
    flatten("", &root, &mut units);

    let mut file = TranslationFile::new(FileFormat::Yaml, units);
    file.source_language = language;
    file
}

/// The language code of a mapping whose only key is a locale wrapping a mapping
fn language_root(mapping: &Mapping) -> Option<String> {
    if mapping.len() != 1 {
        return None;
    }
    match mapping.iter().next() {
        Some((Value::String(code), Value::Mapping(_))) if looks_like_locale(code) => Some(code.clone()),
        _ => None,
    }
}

/// Two-letter language codes with an optional region (`en`, `pt-BR`, `zh_TW`)
fn looks_like_locale(code: &str) -> bool {
    let primary = code.split(['-', '_']).next().unwrap_or_default();
    primary.len() == 2 && language_utils::validate_language_code(code).is_ok()
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<TranslationUnit>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                match key_to_string(key) {
                    Some(key) => flatten(&join_key(prefix, &key), child, out),
                    None => debug!("Skipping non-scalar key under '{}'", prefix),
                }
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(&join_key(prefix, &index.to_string()), child, out);
            }
        }
        Value::String(s) => out.push(TranslationUnit::new(prefix, s.as_str())),
        Value::Number(n) => out.push(TranslationUnit::new(prefix, n.to_string())),
        Value::Bool(b) => out.push(TranslationUnit::new(prefix, b.to_string())),
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
        Value::Null => debug!("Skipping empty value for '{}'", prefix),
    }
}

/// Serialize units as a bilingual YAML sequence
pub fn serialize(units: &[TranslationUnit]) -> Result<String, FormatError> {
    serde_yaml::to_string(units).map_err(|e| FormatError::serialize(FORMAT, e))
}
