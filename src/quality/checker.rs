/*!
 * Runs the configured checks over units and files.
 *
 * [`QualityChecker::check_file`] is the entry point used by the CLI: it runs
 * every enabled check, adds duplicate-key issues and feeds the collected
 * counts into [`calculate_overall_score`].
 */

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use super::checks::{self, GlossaryTerm};
use super::issues::{Issue, IssueKind, Severity};
use super::score::{QualityResults, calculate_overall_score};
use crate::formats::{TranslationFile, TranslationUnit};

/// Which checks run and how they are tuned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_true")]
    pub placeholders: bool,

    #[serde(default = "default_true")]
    pub markup: bool,

    #[serde(default = "default_true")]
    pub numbers: bool,

    #[serde(default = "default_true")]
    pub length_ratio: bool,

    #[serde(default = "default_true")]
    pub untranslated_copy: bool,

    #[serde(default = "default_true")]
    pub whitespace: bool,

    #[serde(default = "default_true")]
    pub punctuation: bool,

    #[serde(default = "default_true")]
    pub duplicate_keys: bool,

    /// Lowest accepted target/source length ratio
    #[serde(default = "default_length_ratio_min")]
    pub length_ratio_min: f64,

    /// Highest accepted target/source length ratio
    #[serde(default = "default_length_ratio_max")]
    pub length_ratio_max: f64,

    /// Absolute character limit for translations
    #[serde(default)]
    pub max_length: Option<usize>,

    #[serde(default)]
    pub glossary: Vec<GlossaryTerm>,

    /// Replaces the default severity of an issue kind
    #[serde(default)]
    pub severity_overrides: HashMap<IssueKind, Severity>,
}

fn default_true() -> bool {
    true
}

fn default_length_ratio_min() -> f64 {
    0.3
}

fn default_length_ratio_max() -> f64 {
    3.0
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            placeholders: true,
            markup: true,
            numbers: true,
            length_ratio: true,
            untranslated_copy: true,
            whitespace: true,
            punctuation: true,
            duplicate_keys: true,
            length_ratio_min: default_length_ratio_min(),
            length_ratio_max: default_length_ratio_max(),
            max_length: None,
            glossary: Vec::new(),
            severity_overrides: HashMap::new(),
        }
    }
}

/// Quality checker for translation units
#[derive(Debug, Clone, Default)]
pub struct QualityChecker {
    config: CheckConfig,
}

impl QualityChecker {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn apply_overrides(&self, mut issue: Issue) -> Issue {
        if let Some(severity) = self.config.severity_overrides.get(&issue.kind) {
            issue.severity = *severity;
        }
        issue
    }

    /// Check a source text against a candidate translation
    pub fn check_text(&self, key: &str, source: &str, target: &str) -> Vec<Issue> {
        if let Some(issue) = checks::check_missing(key, Some(target)) {
            return vec![self.apply_overrides(issue)];
        }

        let config = &self.config;
        let mut found: Vec<Option<Issue>> = Vec::new();

        if config.placeholders {
            found.push(checks::check_placeholders(key, source, target));
        }
        if config.markup {
            found.push(checks::check_markup(key, source, target));
        }
        if config.numbers {
            found.push(checks::check_numbers(key, source, target));
        }
        if !config.glossary.is_empty() {
            found.push(checks::check_glossary(key, source, target, &config.glossary));
        }
        if config.length_ratio {
            found.push(checks::check_length_ratio(
                key,
                source,
                target,
                config.length_ratio_min,
                config.length_ratio_max,
            ));
        }
        if let Some(max_length) = config.max_length {
            found.push(checks::check_max_length(key, target, max_length));
        }
        if config.untranslated_copy {
            found.push(checks::check_untranslated_copy(key, source, target));
        }
        if config.whitespace {
            found.push(checks::check_whitespace(key, source, target));
        }
        if config.punctuation {
            found.push(checks::check_punctuation(key, source, target));
        }

        found
            .into_iter()
            .flatten()
            .map(|issue| self.apply_overrides(issue))
            .collect()
    }

    /// Check one unit; untranslated units only report the missing translation
    pub fn check_unit(&self, unit: &TranslationUnit) -> Vec<Issue> {
        match unit.target.as_deref() {
            Some(target) => self.check_text(&unit.key, &unit.source, target),
            None => checks::check_missing(&unit.key, None)
                .map(|issue| self.apply_overrides(issue))
                .into_iter()
                .collect(),
        }
    }

    fn duplicate_key_issues(&self, units: &[TranslationUnit]) -> Vec<Issue> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut issues = Vec::new();

        for unit in units {
            if !seen.insert(unit.key.as_str()) && reported.insert(unit.key.as_str()) {
                let count = units.iter().filter(|u| u.key == unit.key).count();
                let message = match unit.line {
                    Some(line) => format!("Key appears {} times (repeated at line {})", count, line),
                    None => format!("Key appears {} times", count),
                };
                issues.push(self.apply_overrides(Issue::new(&unit.key, IssueKind::DuplicateKey, message)));
            }
        }

        issues
    }

    /// Check every unit of a file and score the result
    pub fn check_file(&self, file: &TranslationFile) -> QualityResults {
        let mut issues: Vec<Issue> = file.units.iter().flat_map(|u| self.check_unit(u)).collect();

        if self.config.duplicate_keys {
            issues.extend(self.duplicate_key_issues(&file.units));
        }

        let mut results = QualityResults {
            total_count: file.units.len(),
            translated_count: file.translated_count(),
            issues,
            score: 0,
        };
        calculate_overall_score(&mut results);

        debug!(
            "Checked {} units: {} translated, {} issues, score {}",
            results.total_count,
            results.translated_count,
            results.issues.len(),
            results.score
        );

        results
    }
}
