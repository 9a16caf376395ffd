/*!
 * Tests for application configuration
 */

use anyhow::Result;
use locqa::app_config::{Config, EngineConfig, EngineKind, LogLevel};
use locqa::quality::GlossaryTerm;
use locqa::report::ReportFormat;

use crate::common;

#[test]
fn test_saveThenLoad_withCustomSettings_shouldPreserveEverything() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("locqa.json");

    let mut config = Config {
        source_language: "en".to_string(),
        target_language: "pt-BR".to_string(),
        log_level: LogLevel::Debug,
        ..Config::default()
    };
    config.checks.max_length = Some(40);
    config.checks.glossary = vec![GlossaryTerm::new("Inbox", "Caixa de entrada")];
    config.engines.engines = vec![
        EngineConfig::http("primary", "https://translate.example.com/translate"),
        EngineConfig::mock("offline"),
    ];
    config.report.format = ReportFormat::Json;
    config.report.min_score = 90;

    config.save(&path)?;
    let loaded = Config::load(&path)?;

    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
    Ok(())
}

#[test]
fn test_load_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "locqa.json", "{ not json")?;

    let err = Config::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_validate_withZeroMaxLength_shouldFail() {
    let mut config = Config::default();
    config.checks.max_length = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroConcurrency_shouldFail() {
    let mut config = Config::default();
    config.engines.concurrent_requests = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_buildOrchestrator_shouldKeepEnabledEnginesInOrder() -> Result<()> {
    let mut config = Config::default();
    let mut disabled = EngineConfig::mock("disabled");
    disabled.enabled = false;
    config.engines.engines = vec![
        EngineConfig::mock("first"),
        disabled,
        EngineConfig::http("second", "http://127.0.0.1:9/translate"),
    ];

    let orchestrator = config.engines.build_orchestrator(&config, false)?;

    assert_eq!(orchestrator.engine_names(), vec!["first", "second"]);
    assert_eq!(config.engines.engines[2].kind, EngineKind::Http);
    Ok(())
}

#[test]
fn test_buildOrchestrator_withDryRun_shouldUseOnlyMock() -> Result<()> {
    let config = Config::default();
    let orchestrator = config.engines.build_orchestrator(&config, true)?;
    assert_eq!(orchestrator.engine_names(), vec!["dry-run"]);
    Ok(())
}

#[test]
fn test_buildOrchestrator_withNoEnabledEngines_shouldFail() {
    let mut config = Config::default();
    config.engines.engines.iter_mut().for_each(|e| e.enabled = false);
    assert!(config.engines.build_orchestrator(&config, false).is_err());
}
