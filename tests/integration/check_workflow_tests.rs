/*!
 * End-to-end checks: load files from disk, check them and build reports
 */

use anyhow::Result;
use locqa::file_utils::FileManager;
use locqa::formats::{self, TranslationFile};
use locqa::quality::{CheckConfig, IssueKind, QualityChecker, Severity};
use locqa::report::{QaReport, ReportFormat, render_reports};

use crate::common;

fn report_for(path: &std::path::Path, file: &TranslationFile, min_score: u8) -> QaReport {
    let results = QualityChecker::default().check_file(file);
    QaReport::new(
        path.display().to_string(),
        file.source_language.clone(),
        file.target_language.clone(),
        results,
        min_score,
    )
}

#[test]
fn test_checkCsvFile_shouldFindPlaceholderAndGap() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "menu.fr.csv", common::SAMPLE_CSV)?;

    let file = formats::load(&path)?;
    let results = QualityChecker::default().check_file(&file);

    assert_eq!(results.total_count, 4);
    assert_eq!(results.translated_count, 3);
    assert_eq!(results.count_by_kind(IssueKind::PlaceholderMismatch), 1);
    assert_eq!(results.count_by_kind(IssueKind::MissingTranslation), 1);
    assert_eq!(results.issues.len(), 2);
    assert!(results.issues_for("menu.greeting")[0].message.contains("{name}"));
    // 45 coverage + (40 - 6) quality
    assert_eq!(results.score, 79);
    Ok(())
}

#[test]
fn test_checkXliffFile_shouldFlagMarkupAndNumbers() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "cart.xlf", common::SAMPLE_XLIFF)?;

    let file = formats::load(&path)?;
    let report = report_for(&path, &file, 95);

    let issues = report.results.issues_for("cart.items");
    let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueKind::MarkupMismatch));
    assert!(kinds.contains(&IssueKind::NumberMismatch));
    assert!(report.results.issues_for("cart.empty").is_empty());

    assert_eq!(report.summary.medium, 2);
    assert_eq!(report.results.score, 97);
    assert!(report.passed());
    assert_eq!(report.target_language.as_deref(), Some("de"));
    Ok(())
}

#[test]
fn test_checkPairedYamlLocales_shouldReportMissingKey() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source_path = common::create_test_file(temp_dir.path(), "en.yml", common::SOURCE_YAML)?;
    let target_path = common::create_test_file(temp_dir.path(), "es.yml", common::TARGET_YAML)?;

    let file = TranslationFile::pair(formats::load(&source_path)?, formats::load(&target_path)?);
    let report = report_for(&target_path, &file, 80);

    assert_eq!(report.results.issues.len(), 1);
    assert_eq!(report.results.issues[0].key, "app.delete");
    assert_eq!(report.results.issues[0].severity, Severity::High);
    // 40 coverage + (40 - 3) quality
    assert_eq!(report.results.score, 77);
    assert!(!report.passed());
    assert!(report.to_text().contains("Languages: en -> es"));
    Ok(())
}

#[test]
fn test_checkWithOverridesAndDisabledChecks_shouldChangeOutcome() -> Result<()> {
    let file = formats::parse(common::SAMPLE_XLIFF, formats::FileFormat::Xliff)?;

    let mut config = CheckConfig::default();
    config.numbers = false;
    config.severity_overrides.insert(IssueKind::MarkupMismatch, Severity::High);
    let results = QualityChecker::new(config).check_file(&file);

    assert_eq!(results.count_by_kind(IssueKind::NumberMismatch), 0);
    assert_eq!(results.count_by_severity(Severity::High), 1);
    assert_eq!(results.score, 97);
    Ok(())
}

#[test]
fn test_directoryScan_shouldRenderOneReportDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "menu.csv", common::SAMPLE_CSV)?;
    common::create_test_file(temp_dir.path(), "locales/cart.xlf", common::SAMPLE_XLIFF)?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a translation file")?;

    let paths = FileManager::find_translation_files(temp_dir.path())?;
    assert_eq!(paths.len(), 2);

    let reports = paths
        .iter()
        .map(|path| Ok(report_for(path, &formats::load(path)?, 80)))
        .collect::<Result<Vec<_>>>()?;

    let json: serde_json::Value = serde_json::from_str(&render_reports(&reports, ReportFormat::Json)?)?;
    assert_eq!(json.as_array().map(Vec::len), Some(2));

    let csv = render_reports(&reports, ReportFormat::Csv)?;
    // header + 2 CSV issues + 2 XLIFF issues
    assert_eq!(csv.lines().count(), 5);

    let text = render_reports(&reports, ReportFormat::Text)?;
    assert_eq!(text.matches("Score: ").count(), 2);
    Ok(())
}

#[test]
fn test_reportWrittenAtomically_shouldBeReadableJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "menu.csv", common::SAMPLE_CSV)?;
    let report = report_for(&input, &formats::load(&input)?, 80);

    let output = temp_dir.path().join("reports").join("menu.json");
    FileManager::write_atomic(&output, &report.render(ReportFormat::Json)?)?;

    let value: serde_json::Value = serde_json::from_str(&FileManager::read_to_string(&output)?)?;
    assert_eq!(value["results"]["score"], 79);
    assert_eq!(value["summary"]["passed"], false);
    Ok(())
}
