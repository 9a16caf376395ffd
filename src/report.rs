/*!
 * QA reports for checked files.
 *
 * A [`QaReport`] wraps the results of one file with run metadata and a
 * summary, and renders as plain text, JSON or an issue CSV.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io;
use uuid::Uuid;

use crate::errors::FormatError;
use crate::quality::{IssueKind, QualityResults, Severity};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(anyhow::anyhow!("Invalid report format: {}", s)),
        }
    }
}

/// Counts derived from the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub by_kind: BTreeMap<IssueKind, usize>,
    pub coverage: f64,
    pub grade: char,
    pub min_score: u8,
    pub passed: bool,
}

impl ReportSummary {
    fn from_results(results: &QualityResults, min_score: u8) -> Self {
        let mut by_kind = BTreeMap::new();
        for issue in &results.issues {
            *by_kind.entry(issue.kind).or_insert(0) += 1;
        }

        Self {
            high: results.count_by_severity(Severity::High),
            medium: results.count_by_severity(Severity::Medium),
            low: results.count_by_severity(Severity::Low),
            by_kind,
            coverage: results.coverage(),
            grade: results.grade(),
            min_score,
            passed: results.score >= min_score,
        }
    }
}

/// Report for one checked file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub file: String,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub results: QualityResults,
    pub summary: ReportSummary,
}

impl QaReport {
    pub fn new(
        file: impl Into<String>,
        source_language: Option<String>,
        target_language: Option<String>,
        results: QualityResults,
        min_score: u8,
    ) -> Self {
        let summary = ReportSummary::from_results(&results, min_score);
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            file: file.into(),
            source_language,
            target_language,
            results,
            summary,
        }
    }

    /// Whether the score reached the minimum
    pub fn passed(&self) -> bool {
        self.summary.passed
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let results = &self.results;
        let summary = &self.summary;

        let _ = writeln!(out, "File: {}", self.file);
        let _ = writeln!(
            out,
            "Languages: {} -> {}",
            self.source_language.as_deref().unwrap_or("?"),
            self.target_language.as_deref().unwrap_or("?")
        );
        let _ = writeln!(
            out,
            "Units: {} ({} translated, {:.1}% coverage)",
            results.total_count,
            results.translated_count,
            summary.coverage * 100.0
        );
        let _ = writeln!(
            out,
            "Issues: {} high, {} medium, {} low",
            summary.high, summary.medium, summary.low
        );
        let _ = writeln!(
            out,
            "Score: {}/100 ({}) {} (min {})",
            results.score,
            summary.grade,
            if summary.passed { "PASS" } else { "FAIL" },
            summary.min_score
        );

        if !results.issues.is_empty() {
            let mut issues: Vec<_> = results.issues.iter().collect();
            issues.sort_by(|a, b| a.severity.cmp(&b.severity).then_with(|| a.key.cmp(&b.key)));

            let _ = writeln!(out, "\nIssues:");
            for issue in issues {
                let _ = writeln!(out, "  [{}] {}: {}", issue.severity, issue.key, issue.message);
            }
        }

        out
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        serde_json::to_string_pretty(self).map_err(|e| FormatError::serialize("JSON", e))
    }

    /// One row per issue: file, key, kind, severity, message
    pub fn write_issues_csv<W: io::Write>(&self, writer: W) -> Result<(), FormatError> {
        write_issues_csv(std::slice::from_ref(self), writer)
    }

    fn write_issue_rows<W: io::Write>(&self, csv_writer: &mut csv::Writer<W>) -> Result<(), FormatError> {
        for issue in &self.results.issues {
            csv_writer
                .write_record([
                    self.file.as_str(),
                    issue.key.as_str(),
                    issue.kind.as_str(),
                    issue.severity.as_str(),
                    issue.message.as_str(),
                ])
                .map_err(csv_err)?;
        }
        Ok(())
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, FormatError> {
        render_reports(std::slice::from_ref(self), format)
    }
}

fn csv_err(error: csv::Error) -> FormatError {
    FormatError::serialize("CSV", error)
}

/// Issues of several reports under a single header row
pub fn write_issues_csv<W: io::Write>(reports: &[QaReport], writer: W) -> Result<(), FormatError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["file", "key", "kind", "severity", "message"])
        .map_err(csv_err)?;
    for report in reports {
        report.write_issue_rows(&mut csv_writer)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render reports as one document: a single JSON object or array, one CSV table, or text blocks
pub fn render_reports(reports: &[QaReport], format: ReportFormat) -> Result<String, FormatError> {
    match format {
        ReportFormat::Text => Ok(reports
            .iter()
            .map(QaReport::to_text)
            .collect::<Vec<_>>()
            .join("\n")),
        ReportFormat::Json => match reports {
            [single] => single.to_json(),
            many => serde_json::to_string_pretty(many).map_err(|e| FormatError::serialize("JSON", e)),
        },
        ReportFormat::Csv => {
            let mut buffer = Vec::new();
            write_issues_csv(reports, &mut buffer)?;
            String::from_utf8(buffer).map_err(|e| FormatError::serialize("CSV", e))
        }
    }
}
