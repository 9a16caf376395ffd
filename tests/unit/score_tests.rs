/*!
 * Tests for the overall score calculator
 */

use locqa::quality::{Issue, IssueKind, QualityResults, Severity, calculate_overall_score};

fn issues(high: usize, medium: usize, low: usize) -> Vec<Issue> {
    let mut out = Vec::new();
    for (count, kind) in [
        (high, IssueKind::PlaceholderMismatch),
        (medium, IssueKind::MarkupMismatch),
        (low, IssueKind::PunctuationMismatch),
    ] {
        for i in 0..count {
            out.push(Issue::new(format!("{}-{}", kind, i), kind, "test"));
        }
    }
    out
}

fn score(total: usize, translated: usize, high: usize, medium: usize, low: usize) -> u8 {
    let mut results = QualityResults {
        total_count: total,
        translated_count: translated,
        issues: issues(high, medium, low),
        score: 0,
    };
    calculate_overall_score(&mut results)
}

/// An empty file scores zero whatever its issues
#[test]
fn test_score_withZeroTotal_shouldBeZero() {
    assert_eq!(score(0, 0, 0, 0, 0), 0);
    assert_eq!(score(0, 0, 4, 2, 1), 0);
}

/// Full coverage without issues is a perfect score
#[test]
fn test_score_withFullCoverageAndNoIssues_shouldBeHundred() {
    for total in [1, 7, 250] {
        assert_eq!(score(total, total, 0, 0, 0), 100);
    }
}

/// Half coverage and one high issue: 30 + 37 = 67
#[test]
fn test_score_withHalfCoverageAndOneHigh_shouldBe67() {
    assert_eq!(score(10, 5, 1, 0, 0), 67);
}

/// Full coverage with a penalty of 40 or more leaves the coverage part only
#[test]
fn test_score_withPenaltyAtQualityCap_shouldBeSixty() {
    assert_eq!(score(10, 10, 3, 21, 0), 60);
    assert_eq!(score(10, 10, 20, 20, 20), 60);
}

/// Three high and ten medium issues cost 24 of the 40 quality points
#[test]
fn test_score_withThreeHighTenMedium_shouldFollowPenaltyTable() {
    assert_eq!(score(10, 10, 3, 10, 0), 76);
}

/// Adding high issues never raises the score
#[test]
fn test_score_shouldNotIncreaseWithMoreHighIssues() {
    for (total, translated) in [(10, 10), (10, 3), (7, 0), (1, 1)] {
        let mut previous = u8::MAX;
        for high in 0..20 {
            let current = score(total, translated, high, 1, 2);
            assert!(current <= previous, "{}/{} with {} high: {} > {}", translated, total, high, current, previous);
            previous = current;
        }
    }
}

/// Scores stay in range for a grid of valid inputs
#[test]
fn test_score_shouldStayWithinBounds() {
    for total in [1usize, 3, 10, 99] {
        for translated in [0, total / 2, total] {
            for high in [0, 1, 5, 50] {
                for low in [0, 3, 200] {
                    let s = score(total, translated, high, high, low);
                    assert!(s <= 100);
                }
            }
        }
    }
}

/// The computed score is stored in the aggregate
#[test]
fn test_score_shouldWriteBackIntoResults() {
    let mut results = QualityResults {
        total_count: 4,
        translated_count: 4,
        issues: issues(0, 0, 1),
        score: 0,
    };

    let returned = calculate_overall_score(&mut results);

    assert_eq!(returned, 100);
    assert_eq!(results.score, 100);
}

/// Overriding an issue's severity changes its weight
#[test]
fn test_score_shouldWeighIssuesBySeverity() {
    let mut results = QualityResults::new(2, 2, vec![
        Issue::new("a", IssueKind::PunctuationMismatch, "p").with_severity(Severity::High),
    ]);
    assert_eq!(results.score, 97);

    results.issues[0].severity = Severity::Low;
    assert_eq!(results.recompute(), 100);
}
