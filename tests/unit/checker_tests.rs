/*!
 * Tests for the quality checker
 */

use locqa::formats::{FileFormat, TranslationFile, TranslationUnit};
use locqa::quality::{CheckConfig, GlossaryTerm, IssueKind, QualityChecker, Severity};

fn file(units: Vec<TranslationUnit>) -> TranslationFile {
    TranslationFile::new(FileFormat::Yaml, units)
}

#[test]
fn test_checkFile_withPerfectTranslations_shouldScoreHundred() {
    let checker = QualityChecker::default();
    let results = checker.check_file(&file(vec![
        TranslationUnit::new("a", "Save changes?").with_target("Änderungen speichern?"),
        TranslationUnit::new("b", "{count} files deleted.").with_target("{count} Dateien gelöscht."),
        TranslationUnit::new("c", "<i>Loading</i>...").with_target("<i>Laden</i>..."),
    ]));

    assert!(results.issues.is_empty(), "unexpected issues: {:?}", results.issues);
    assert_eq!(results.score, 100);
    assert_eq!(results.grade(), 'A');
}

#[test]
fn test_checkFile_withMissingAndBrokenUnits_shouldCombineCoverageAndPenalty() {
    let checker = QualityChecker::default();
    let results = checker.check_file(&file(vec![
        TranslationUnit::new("a", "Open").with_target("Ouvrir"),
        TranslationUnit::new("b", "Hello {name}").with_target("Bonjour"),
        TranslationUnit::new("c", "Close"),
        TranslationUnit::new("d", "Page 2").with_target("Seite 3"),
    ]));

    // coverage 3/4 -> 45; high x2 (missing, placeholder) + medium (number) = 7.5
    assert_eq!(results.count_by_severity(Severity::High), 2);
    assert_eq!(results.count_by_severity(Severity::Medium), 1);
    assert_eq!(results.score, 78);
    assert_eq!(results.issues_for("b")[0].kind, IssueKind::PlaceholderMismatch);
}

#[test]
fn test_checkFile_withGlossary_shouldFlagWrongTerms() {
    let config = CheckConfig {
        glossary: vec![GlossaryTerm::new("workspace", "espace de travail")],
        ..CheckConfig::default()
    };
    let checker = QualityChecker::new(config);

    let results = checker.check_file(&file(vec![
        TranslationUnit::new("a", "Create a workspace").with_target("Créer un espace de travail"),
        TranslationUnit::new("b", "Leave the workspace").with_target("Quitter le bureau"),
    ]));

    assert_eq!(results.count_by_kind(IssueKind::GlossaryViolation), 1);
    assert_eq!(results.issues[0].key, "b");
}

#[test]
fn test_checkFile_withDuplicateKeysDisabled_shouldIgnoreRepeats() {
    let units = vec![
        TranslationUnit::new("a", "Yes").with_target("Oui"),
        TranslationUnit::new("a", "Yes").with_target("Oui"),
    ];

    let enabled = QualityChecker::default().check_file(&file(units.clone()));
    assert_eq!(enabled.count_by_kind(IssueKind::DuplicateKey), 1);

    let checker = QualityChecker::new(CheckConfig {
        duplicate_keys: false,
        ..CheckConfig::default()
    });
    assert!(checker.check_file(&file(units)).issues.is_empty());
}

#[test]
fn test_checkUnit_withBlankTarget_shouldCountAsMissing() {
    let checker = QualityChecker::default();
    let unit = TranslationUnit::new("a", "Open").with_target("   ");

    let issues = checker.check_unit(&unit);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::MissingTranslation);
}

#[test]
fn test_checkText_withFullWidthPunctuation_shouldMatchAsciiClass() {
    let checker = QualityChecker::default();
    assert!(checker.check_text("k", "Are you sure?", "本当によろしいですか？").is_empty());
}
