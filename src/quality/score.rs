/*!
 * Overall quality score for a check run.
 *
 * The score blends coverage and issue severity into a single integer:
 * - Coverage: up to 60 points, proportional to translated units
 * - Quality: up to 40 points, minus a weighted issue penalty
 *
 * The result is always an integer in `[0, 100]`.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use super::issues::{Issue, IssueKind, Severity};

/// Points awarded for full coverage
const COVERAGE_POINTS: f64 = 60.0;

/// Points available before issue penalties
const QUALITY_POINTS: f64 = 40.0;

/// Aggregate of one quality-check run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityResults {
    /// Number of units checked
    pub total_count: usize,
    /// Number of units with a non-blank translation
    pub translated_count: usize,
    /// Every issue found
    pub issues: Vec<Issue>,
    /// Last computed overall score
    pub score: u8,
}

impl QualityResults {
    /// Create an aggregate and compute its score
    pub fn new(total_count: usize, translated_count: usize, issues: Vec<Issue>) -> Self {
        let mut results = Self {
            total_count,
            translated_count,
            issues,
            score: 0,
        };
        calculate_overall_score(&mut results);
        results
    }

    /// Recompute the score after the aggregate was modified
    pub fn recompute(&mut self) -> u8 {
        calculate_overall_score(self)
    }

    /// Number of issues with the given severity
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Number of issues of the given kind
    pub fn count_by_kind(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    /// Issues attached to one unit key
    pub fn issues_for(&self, key: &str) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.key == key).collect()
    }

    /// Share of translated units (0.0 - 1.0)
    pub fn coverage(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.translated_count.min(self.total_count) as f64 / self.total_count as f64
    }

    /// Letter grade (A-F) for the current score
    pub fn grade(&self) -> char {
        match self.score {
            s if s >= 90 => 'A',
            s if s >= 80 => 'B',
            s if s >= 70 => 'C',
            s if s >= 60 => 'D',
            _ => 'F',
        }
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Score: {} (Grade: {}) - {}/{} translated, {} issues ({} high, {} medium, {} low)",
            self.score,
            self.grade(),
            self.translated_count,
            self.total_count,
            self.issues.len(),
            self.count_by_severity(Severity::High),
            self.count_by_severity(Severity::Medium),
            self.count_by_severity(Severity::Low),
        )
    }
}

/// Weighted penalty of a set of issues (high 3, medium 1.5, low 0.5)
pub fn issue_penalty(issues: &[Issue]) -> f64 {
    issues.iter().map(|i| i.severity.weight()).sum()
}

/// Compute the overall score, store it in the aggregate and return it.
///
/// `translated_count` above `total_count` is treated as full coverage.
pub fn calculate_overall_score(results: &mut QualityResults) -> u8 {
    if results.total_count == 0 {
        results.score = 0;
        return 0;
    }

    let base = results.coverage() * COVERAGE_POINTS;
    let penalty = issue_penalty(&results.issues);
    let quality = (QUALITY_POINTS - penalty).max(0.0);
    let score = (base + quality).round().min(100.0) as u8;

    debug!(
        "Score: base {:.1} + quality {:.1} (penalty {:.1}) = {}",
        base, quality, penalty, score
    );

    results.score = score;
    score
}
