/*!
 * Engine chain tests: fallback, retries, filling and candidate comparison
 */

use anyhow::Result;
use std::sync::Arc;

use locqa::engines::{
    EngineOrchestrator, EngineRequest, MockEngine, RetryPolicy, TranslationCache, TranslationEngine,
};
use locqa::errors::EngineError;
use locqa::formats::{self, FileFormat, TranslationFile, TranslationUnit};
use locqa::quality::{IssueKind, QualityChecker};

use crate::common;

fn orchestrator(engines: Vec<Arc<dyn TranslationEngine>>) -> EngineOrchestrator {
    EngineOrchestrator::new(engines, RetryPolicy::none()).with_languages("en", "fr")
}

#[tokio::test]
async fn test_fallback_shouldUseNextEngineAfterFailure() {
    common::init_logging();
    let failing = MockEngine::failing();
    let working = MockEngine::working();
    let chain = orchestrator(vec![Arc::new(failing.clone()), Arc::new(working.clone())]);

    let text = chain
        .translate_with_fallback(&EngineRequest::new("Save", "en", "fr"))
        .await
        .unwrap();

    assert_eq!(text, "[fr] Save");
    assert_eq!(failing.request_count(), 1);
    assert_eq!(working.request_count(), 1);
}

#[tokio::test]
async fn test_fallback_withEveryEngineFailing_shouldListEachFailure() {
    let chain = orchestrator(vec![
        Arc::new(MockEngine::failing()),
        Arc::new(MockEngine::empty()),
    ]);

    let err = chain
        .translate_with_fallback(&EngineRequest::new("Save", "en", "fr"))
        .await
        .unwrap_err();

    match err {
        EngineError::AllEnginesFailed(failures) => {
            assert_eq!(failures.len(), 2);
            assert!(failures[0].starts_with("mock-failing:"));
            assert!(failures[1].starts_with("mock-empty:"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_retries_shouldRecoverFromIntermittentFailures() {
    let engine = MockEngine::intermittent(2);
    let chain = EngineOrchestrator::new(vec![Arc::new(engine.clone())], RetryPolicy::new(1, 1))
        .with_concurrency(1);

    let mut file = TranslationFile::new(
        FileFormat::Csv,
        vec![TranslationUnit::new("a", "Open"), TranslationUnit::new("b", "Close")],
    );
    let summary = chain.fill_missing(&mut file).await;

    // second request fails once and is retried
    assert_eq!(summary.filled, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(engine.request_count(), 3);
}

#[tokio::test]
async fn test_fillMissing_thenRecheck_shouldRaiseScore() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "menu.csv", common::SAMPLE_CSV)?;
    let mut file = formats::load(&path)?;

    let checker = QualityChecker::default();
    let before = checker.check_file(&file);

    let summary = orchestrator(vec![Arc::new(MockEngine::working())])
        .fill_missing(&mut file)
        .await;
    assert_eq!(summary.filled, 1);

    let output = temp_dir.path().join("menu.filled.csv");
    formats::save(&output, &file)?;
    let after = checker.check_file(&formats::load(&output)?);

    assert_eq!(after.count_by_kind(IssueKind::MissingTranslation), 0);
    assert_eq!(after.translated_count, 4);
    assert!(after.score > before.score, "{} -> {}", before.score, after.score);
    assert_eq!(after.score, 97);
    assert_eq!(
        file.find("menu.quit").and_then(|u| u.target.as_deref()),
        Some("[fr] Quit")
    );
    Ok(())
}

#[tokio::test]
async fn test_fillMissing_withRepeatedSources_shouldHitCache() {
    let engine = MockEngine::working();
    let chain = orchestrator(vec![Arc::new(engine.clone())])
        .with_cache(TranslationCache::new(true))
        .with_concurrency(1);

    let mut file = TranslationFile::new(
        FileFormat::Yaml,
        vec![
            TranslationUnit::new("toolbar.cancel", "Cancel"),
            TranslationUnit::new("dialog.cancel", "Cancel"),
            TranslationUnit::new("dialog.ok", "OK").with_target("OK"),
            TranslationUnit::new("blank", "   "),
        ],
    );
    let summary = chain.fill_missing(&mut file).await;

    assert_eq!(summary.filled, 2);
    assert_eq!(summary.cached, 1);
    assert_eq!(engine.request_count(), 1);
    assert_eq!(chain.cache().stats().hits, 1);
    assert_eq!(file.find("blank").and_then(|u| u.target.clone()), None);
}

#[tokio::test]
async fn test_fillMissing_withFailingEngine_shouldLeaveUnitsEmpty() {
    let chain = orchestrator(vec![Arc::new(MockEngine::failing())]);
    let mut file = formats::parse(common::SAMPLE_CSV, FileFormat::Csv).unwrap();

    let summary = chain.fill_missing(&mut file).await;

    assert_eq!(summary.filled, 0);
    assert_eq!(summary.failed, 1);
    assert!(file.find("menu.quit").and_then(|u| u.target.as_ref()).is_none());
}

#[test]
fn test_compare_shouldRankCleanCandidateFirst() {
    let file = formats::parse(common::SAMPLE_CSV, FileFormat::Csv).unwrap();
    let unit = file.find("menu.greeting").unwrap().clone();
    let chain = orchestrator(vec![
        Arc::new(MockEngine::echo()),
        Arc::new(MockEngine::working()),
        Arc::new(MockEngine::failing()),
    ]);

    let candidates = tokio_test::block_on(chain.compare(&file, &unit)).unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].engine, "mock");
    assert_eq!(candidates[0].penalty, 0.0);
    assert_eq!(candidates[1].engine, "mock-echo");
    assert_eq!(candidates[1].issues[0].kind, IssueKind::UntranslatedCopy);
}

#[test]
fn test_compare_withoutEngines_shouldFail() {
    let file = TranslationFile::new(FileFormat::Csv, vec![TranslationUnit::new("a", "Open")]);
    let chain = orchestrator(Vec::new());

    let err = tokio_test::block_on(chain.compare(&file, &file.units[0])).unwrap_err();
    assert!(matches!(err, EngineError::NotConfigured(_)));
}
