/*!
 * CSV / TSV translation tables.
 *
 * A header row is required. Columns are matched case-insensitively:
 * - key: `key` or `id`
 * - source: `source` or `original`
 * - target: `target` or `translation` (optional)
 * - note: `note` or `comment` (optional)
 *
 * Empty target cells mean the unit is untranslated.
 */

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::TranslationUnit;
use crate::errors::FormatError;

const KEY_COLUMNS: [&str; 2] = ["key", "id"];
const SOURCE_COLUMNS: [&str; 2] = ["source", "original"];
const TARGET_COLUMNS: [&str; 2] = ["target", "translation"];
const NOTE_COLUMNS: [&str; 2] = ["note", "comment"];

fn format_name(delimiter: u8) -> &'static str {
    if delimiter == b'\t' { "TSV" } else { "CSV" }
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index.and_then(|i| record.get(i))
}

/// Parse a delimited table into units
pub fn parse(content: &str, delimiter: u8) -> Result<Vec<TranslationUnit>, FormatError> {
    let format = format_name(delimiter);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FormatError::parse(format, e))?
        .clone();

    let key_idx = find_column(&headers, &KEY_COLUMNS)
        .ok_or_else(|| FormatError::MissingColumn("key".to_string()))?;
    let source_idx = find_column(&headers, &SOURCE_COLUMNS)
        .ok_or_else(|| FormatError::MissingColumn("source".to_string()))?;
    let target_idx = find_column(&headers, &TARGET_COLUMNS);
    let note_idx = find_column(&headers, &NOTE_COLUMNS);

    let mut units = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FormatError::parse(format, e))?;

        let key = cell(&record, Some(key_idx)).unwrap_or_default();
        let source = cell(&record, Some(source_idx)).unwrap_or_default();
        if key.trim().is_empty() && source.trim().is_empty() {
            continue;
        }

        let target = cell(&record, target_idx)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let note = cell(&record, note_idx)
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string);

        units.push(TranslationUnit {
            key: key.trim().to_string(),
            source: source.to_string(),
            target,
            note,
            line: record.position().map(|p| p.line() as usize),
        });
    }

    Ok(units)
}

/// Serialize units as a delimited table with a header row
pub fn serialize(units: &[TranslationUnit], delimiter: u8) -> Result<String, FormatError> {
    let format = format_name(delimiter);
    let with_notes = units.iter().any(|u| u.note.is_some());

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let write_err = |e: csv::Error| FormatError::serialize(format, e);

    if with_notes {
        writer.write_record(["key", "source", "target", "note"]).map_err(write_err)?;
    } else {
        writer.write_record(["key", "source", "target"]).map_err(write_err)?;
    }

    for unit in units {
        let target = unit.target.as_deref().unwrap_or_default();
        if with_notes {
            let note = unit.note.as_deref().unwrap_or_default();
            writer
                .write_record([unit.key.as_str(), unit.source.as_str(), target, note])
                .map_err(write_err)?;
        } else {
            writer
                .write_record([unit.key.as_str(), unit.source.as_str(), target])
                .map_err(write_err)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::serialize(format, e))?;
    String::from_utf8(bytes).map_err(|e| FormatError::serialize(format, e))
}
