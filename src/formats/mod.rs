/*!
 * Translation file formats.
 *
 * This module loads and writes the structured files a localization QA run works on:
 * - `delimited`: CSV / TSV tables with key, source and target columns
 * - `xliff`: XLIFF 1.2 documents
 * - `yaml`: bilingual unit lists or nested locale mappings
 *
 * Every format is read into a [`TranslationFile`] holding flat
 * [`TranslationUnit`]s, which is what the quality checker consumes.
 */

pub mod delimited;
pub mod xliff;
pub mod yaml;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::errors::FormatError;
use crate::file_utils::FileManager;

/// Supported translation file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Comma separated values
    Csv,
    /// Tab separated values
    Tsv,
    /// XLIFF 1.2
    Xliff,
    /// YAML
    Yaml,
}

impl FileFormat {
    /// File extensions recognised as translation files
    pub const EXTENSIONS: [&'static str; 7] = ["csv", "tsv", "xlf", "xliff", "xml", "yaml", "yml"];

    /// Detect format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "xlf" | "xliff" | "xml" => Some(Self::Xliff),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Detect format from a path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Display name used in messages
    pub fn name(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
            Self::Xliff => "XLIFF",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One translatable string with its (optional) translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Unique key/identifier
    pub key: String,

    /// Source text
    #[serde(default)]
    pub source: String,

    /// Translated text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Translator note or comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// 1-based line in the file the unit came from
    #[serde(skip)]
    pub line: Option<usize>,
}

impl TranslationUnit {
    /// Create an untranslated unit
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            target: None,
            note: None,
            line: None,
        }
    }

    /// Set the translation
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Whether a non-blank translation is present
    pub fn is_translated(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// A parsed translation file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationFile {
    /// Format the file was read from
    pub format: FileFormat,

    /// Source language, when the file declares one
    pub source_language: Option<String>,

    /// Target language, when the file declares one
    pub target_language: Option<String>,

    /// Units in file order
    pub units: Vec<TranslationUnit>,
}

impl TranslationFile {
    /// Create a file from units
    pub fn new(format: FileFormat, units: Vec<TranslationUnit>) -> Self {
        Self {
            format,
            source_language: None,
            target_language: None,
            units,
        }
    }

    /// Number of units with a non-blank translation
    pub fn translated_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_translated()).count()
    }

    /// Find the first unit with the given key
    pub fn find(&self, key: &str) -> Option<&TranslationUnit> {
        self.units.iter().find(|u| u.key == key)
    }

    /// Find the first unit with the given key, mutably
    pub fn find_mut(&mut self, key: &str) -> Option<&mut TranslationUnit> {
        self.units.iter_mut().find(|u| u.key == key)
    }

    /// Join two monolingual files by key.
    ///
    /// Source text comes from `source`; the translation is the target file's
    /// `target` when present, otherwise its `source` text. Keys that only
    /// exist in the target file are dropped.
    pub fn pair(source: TranslationFile, target: TranslationFile) -> TranslationFile {
        let target_language = target
            .target_language
            .clone()
            .or_else(|| target.source_language.clone());

        let mut translations: HashMap<String, String> = HashMap::with_capacity(target.units.len());
        for unit in target.units {
            let text = unit.target.unwrap_or(unit.source);
            translations.entry(unit.key).or_insert(text);
        }

        let mut units = Vec::with_capacity(source.units.len());
        for mut unit in source.units {
            unit.target = translations.remove(&unit.key);
            units.push(unit);
        }

        if !translations.is_empty() {
            let mut orphaned: Vec<&String> = translations.keys().collect();
            orphaned.sort();
            warn!(
                "{} key(s) only exist in the target file and were ignored: {}",
                orphaned.len(),
                orphaned.iter().take(5).map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
            );
        }

        TranslationFile {
            format: source.format,
            source_language: source.source_language,
            target_language,
            units,
        }
    }
}

/// Parse file content in the given format
pub fn parse(content: &str, format: FileFormat) -> Result<TranslationFile, FormatError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let file = match format {
        FileFormat::Csv => TranslationFile::new(format, delimited::parse(content, b',')?),
        FileFormat::Tsv => TranslationFile::new(format, delimited::parse(content, b'\t')?),
        FileFormat::Xliff => xliff::parse(content)?,
        FileFormat::Yaml => yaml::parse(content)?,
    };

    debug!("Parsed {} units from {} content", file.units.len(), format);
    Ok(file)
}

/// Serialize a file in its own format
pub fn serialize(file: &TranslationFile) -> Result<String, FormatError> {
    match file.format {
        FileFormat::Csv => delimited::serialize(&file.units, b','),
        FileFormat::Tsv => delimited::serialize(&file.units, b'\t'),
        FileFormat::Xliff => xliff::serialize(file),
        FileFormat::Yaml => yaml::serialize(&file.units),
    }
}

/// Load a translation file, detecting the format from its extension
pub fn load(path: &Path) -> Result<TranslationFile, FormatError> {
    let format = FileFormat::from_path(path)
        .ok_or_else(|| FormatError::UnsupportedFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path)?;
    parse(&content, format)
}

/// Write a translation file to `path` in the file's format
pub fn save(path: &Path, file: &TranslationFile) -> Result<(), FormatError> {
    let content = serialize(file)?;
    FileManager::write_atomic(path, &content)
        .map_err(|e| FormatError::Io(std::io::Error::other(e.to_string())))
}
