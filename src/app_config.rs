use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engines::{
    EngineOrchestrator, HttpEngine, MockEngine, RetryPolicy, TranslationCache, TranslationEngine,
};
use crate::file_utils::FileManager;
use crate::quality::{CheckConfig, QualityChecker};
use crate::report::ReportFormat;

/// Application configuration module
/// This module handles loading, validating and saving the configuration
/// of a QA run: languages, checks, engines and reporting.

/// Default config file name, looked up in the working directory first
pub const CONFIG_FILE_NAME: &str = "locqa.json";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Quality checks
    #[serde(default)]
    pub checks: CheckConfig,

    /// Translation engines
    #[serde(default)]
    pub engines: EngineSettings,

    /// Report output
    #[serde(default)]
    pub report: ReportConfig,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Engine implementation type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    // @engine: JSON-over-HTTP translation server
    #[default]
    Http,
    // @engine: Offline mock, prefixes text with the target language
    Mock,
}

/// One configured engine
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    // @field: Name used in logs and comparisons
    pub name: String,

    // @field: Engine implementation
    #[serde(default)]
    pub kind: EngineKind,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Disabled engines are skipped
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl EngineConfig {
    pub fn http(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EngineKind::Http,
            endpoint: endpoint.into(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            enabled: true,
        }
    }

    pub fn mock(name: impl Into<String>) -> Self {
        Self {
            kind: EngineKind::Mock,
            ..Self::http(name, "")
        }
    }

    fn build(&self) -> Result<Arc<dyn TranslationEngine>> {
        match self.kind {
            EngineKind::Http => {
                let api_key = Some(self.api_key.clone()).filter(|k| !k.is_empty());
                let engine = HttpEngine::new(&self.name, &self.endpoint, api_key, self.timeout_secs)?;
                Ok(Arc::new(engine))
            }
            EngineKind::Mock => Ok(Arc::new(MockEngine::working().named(&self.name))),
        }
    }
}

/// Engine chain settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineSettings {
    /// Engines in priority order
    #[serde(default)]
    pub engines: Vec<EngineConfig>,

    /// Max concurrent requests while filling
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Retry count for failed requests, per engine
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Reuse translations of repeated strings within a run
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            engines: vec![EngineConfig::http("local", default_http_endpoint())],
            concurrent_requests: default_concurrent_requests(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            cache_enabled: true,
        }
    }
}

impl EngineSettings {
    pub fn enabled_engines(&self) -> impl Iterator<Item = &EngineConfig> {
        self.engines.iter().filter(|e| e.enabled)
    }

    /// Build the orchestrator; a dry run swaps every engine for a mock
    pub fn build_orchestrator(&self, config: &Config, dry_run: bool) -> Result<EngineOrchestrator> {
        let engines: Vec<Arc<dyn TranslationEngine>> = if dry_run {
            vec![Arc::new(MockEngine::working().named("dry-run"))]
        } else {
            self.enabled_engines()
                .map(EngineConfig::build)
                .collect::<Result<Vec<_>>>()?
        };

        if engines.is_empty() {
            return Err(anyhow!("No translation engines enabled in config"));
        }

        Ok(EngineOrchestrator::new(engines, RetryPolicy::new(self.retry_count, self.retry_backoff_ms))
            .with_cache(TranslationCache::new(self.cache_enabled))
            .with_concurrency(self.concurrent_requests)
            .with_checker(QualityChecker::new(config.checks.clone()))
            .with_languages(&config.source_language, &config.target_language))
    }
}

/// Report settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReportConfig {
    /// Scores below this fail the run
    #[serde(default = "default_min_score")]
    pub min_score: u8,

    /// Output format
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            format: ReportFormat::default(),
        }
    }
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_true() -> bool {
    true
}

fn default_min_score() -> u8 {
    80
}

fn default_http_endpoint() -> String {
    "http://localhost:5000/translate".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)
            .context("Invalid source language")?;
        crate::language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        let checks = &self.checks;
        if checks.length_ratio_min <= 0.0 || checks.length_ratio_min >= checks.length_ratio_max {
            return Err(anyhow!(
                "Length ratio bounds must satisfy 0 < min < max (got {} and {})",
                checks.length_ratio_min,
                checks.length_ratio_max
            ));
        }
        if checks.max_length == Some(0) {
            return Err(anyhow!("max_length must be greater than zero"));
        }

        if self.report.min_score > 100 {
            return Err(anyhow!("min_score must be between 0 and 100"));
        }

        if self.engines.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }
        for engine in self.engines.enabled_engines() {
            if engine.name.trim().is_empty() {
                return Err(anyhow!("Engine names must not be empty"));
            }
            if engine.kind == EngineKind::Http {
                url::Url::parse(&engine.endpoint)
                    .with_context(|| format!("Engine '{}' has an invalid endpoint '{}'", engine.name, engine.endpoint))?;
            }
        }

        Ok(())
    }

    /// Config path when none is given: working directory, then the user config dir
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }
        if let Some(user) = dirs::config_dir().map(|d| d.join("locqa").join(CONFIG_FILE_NAME)) {
            if user.exists() {
                return user;
            }
        }
        local
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        FileManager::write_atomic(path, &json)
    }

    /// Load the config, writing a default one first if the file does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config
            .save(path)
            .with_context(|| format!("Failed to write default config: {}", path.display()))?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            log_level: LogLevel::default(),
            checks: CheckConfig::default(),
            engines: EngineSettings::default(),
            report: ReportConfig::default(),
        }
    }
}
