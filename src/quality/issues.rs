/*!
 * Issue model for quality checks.
 *
 * Every check reports its findings as an [`Issue`] tagged with an
 * [`IssueKind`] and a [`Severity`]. Severities drive the score penalty.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a detected translation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Breaks the product (missing text, broken placeholders)
    High,
    /// Visible defect that should be fixed before release
    Medium,
    /// Cosmetic or stylistic
    Low,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Penalty weight used by the overall score
    pub fn weight(self) -> f64 {
        match self {
            Severity::High => 3.0,
            Severity::Medium => 1.5,
            Severity::Low => 0.5,
        }
    }

    /// Lowercase identifier
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(anyhow::anyhow!("Invalid severity: {}", s)),
        }
    }
}

/// Category of a quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingTranslation,
    PlaceholderMismatch,
    DuplicateKey,
    MarkupMismatch,
    NumberMismatch,
    GlossaryViolation,
    LengthRatio,
    MaxLengthExceeded,
    UntranslatedCopy,
    WhitespaceMismatch,
    PunctuationMismatch,
}

impl IssueKind {
    pub const ALL: [IssueKind; 11] = [
        IssueKind::MissingTranslation,
        IssueKind::PlaceholderMismatch,
        IssueKind::DuplicateKey,
        IssueKind::MarkupMismatch,
        IssueKind::NumberMismatch,
        IssueKind::GlossaryViolation,
        IssueKind::LengthRatio,
        IssueKind::MaxLengthExceeded,
        IssueKind::UntranslatedCopy,
        IssueKind::WhitespaceMismatch,
        IssueKind::PunctuationMismatch,
    ];

    /// Severity used when the configuration does not override it
    pub fn default_severity(self) -> Severity {
        match self {
            IssueKind::MissingTranslation
            | IssueKind::PlaceholderMismatch
            | IssueKind::DuplicateKey => Severity::High,
            IssueKind::MarkupMismatch
            | IssueKind::NumberMismatch
            | IssueKind::GlossaryViolation
            | IssueKind::MaxLengthExceeded => Severity::Medium,
            IssueKind::LengthRatio
            | IssueKind::UntranslatedCopy
            | IssueKind::WhitespaceMismatch
            | IssueKind::PunctuationMismatch => Severity::Low,
        }
    }

    /// Snake-case identifier, matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingTranslation => "missing_translation",
            IssueKind::PlaceholderMismatch => "placeholder_mismatch",
            IssueKind::DuplicateKey => "duplicate_key",
            IssueKind::MarkupMismatch => "markup_mismatch",
            IssueKind::NumberMismatch => "number_mismatch",
            IssueKind::GlossaryViolation => "glossary_violation",
            IssueKind::LengthRatio => "length_ratio",
            IssueKind::MaxLengthExceeded => "max_length_exceeded",
            IssueKind::UntranslatedCopy => "untranslated_copy",
            IssueKind::WhitespaceMismatch => "whitespace_mismatch",
            IssueKind::PunctuationMismatch => "punctuation_mismatch",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected problem in one translation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Key of the unit the issue belongs to
    pub key: String,
    /// What was detected
    pub kind: IssueKind,
    /// How much it weighs on the score
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}

impl Issue {
    /// Create an issue with the kind's default severity
    pub fn new(key: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            severity: kind.default_severity(),
            message: message.into(),
        }
    }

    /// Replace the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({}): {}", self.severity, self.key, self.kind, self.message)
    }
}
