/*!
 * Engine orchestration: retries, fallback, gap filling and comparison.
 *
 * Engines are tried in priority order. Each gets `retry_count` retries with
 * exponential backoff before the next engine is asked. Empty translations
 * count as failures.
 */

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::{EngineRequest, TranslationCache, TranslationEngine};
use crate::errors::EngineError;
use crate::formats::{TranslationFile, TranslationUnit};
use crate::quality::{Issue, QualityChecker, issue_penalty};

/// Retry settings applied to every engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub retry_count: u32,
    /// Base backoff, doubled after each failed attempt
    pub backoff_ms: u64,
}

impl RetryPolicy {
    pub fn new(retry_count: u32, backoff_ms: u64) -> Self {
        Self { retry_count, backoff_ms }
    }

    /// No retries and no waiting
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << (attempt.saturating_sub(1)).min(16);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 1000)
    }
}

/// Outcome of filling missing translations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FillSummary {
    /// Units that received a translation
    pub filled: usize,
    /// Units every engine failed on
    pub failed: usize,
    /// Filled units served from the cache
    pub cached: usize,
}

/// One engine's translation of a unit, scored by the quality checks
#[derive(Debug, Clone, Serialize)]
pub struct EngineCandidate {
    pub engine: String,
    pub text: String,
    pub issues: Vec<Issue>,
    /// Weighted issue sum, lower is better
    pub penalty: f64,
}

/// Chains engines with retries and fallback
#[derive(Debug, Clone)]
pub struct EngineOrchestrator {
    engines: Vec<Arc<dyn TranslationEngine>>,
    retry: RetryPolicy,
    cache: TranslationCache,
    concurrent_requests: usize,
    checker: QualityChecker,
    source_language: String,
    target_language: String,
    show_progress: bool,
}

impl EngineOrchestrator {
    /// Create an orchestrator over engines in priority order
    pub fn new(engines: Vec<Arc<dyn TranslationEngine>>, retry: RetryPolicy) -> Self {
        Self {
            engines,
            retry,
            cache: TranslationCache::default(),
            concurrent_requests: 4,
            checker: QualityChecker::default(),
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            show_progress: false,
        }
    }

    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    pub fn with_checker(mut self, checker: QualityChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Languages used when a file does not declare its own
    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_language = source.into();
        self.target_language = target.into();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn engine_names(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// One engine, retried with exponential backoff
    async fn translate_with_retries(
        &self,
        engine: &dyn TranslationEngine,
        request: &EngineRequest,
    ) -> Result<String, EngineError> {
        let mut attempt = 0;
        loop {
            let result = match engine.translate(request).await {
                Ok(text) if text.trim().is_empty() => Err(EngineError::EmptyResponse),
                other => other,
            };

            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.retry.retry_count => {
                    attempt += 1;
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        "{} failed ({}), retry {}/{} in {:?}",
                        engine.name(),
                        e,
                        attempt,
                        self.retry.retry_count,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Translate with the first engine that succeeds
    pub async fn translate_with_fallback(&self, request: &EngineRequest) -> Result<String, EngineError> {
        if self.engines.is_empty() {
            return Err(EngineError::NotConfigured("no translation engines enabled".to_string()));
        }

        let mut failures = Vec::with_capacity(self.engines.len());
        for engine in &self.engines {
            match self.translate_with_retries(engine.as_ref(), request).await {
                Ok(text) => {
                    debug!("{} translated '{}'", engine.name(), request.text);
                    return Ok(text);
                }
                Err(e) => {
                    warn!("{} gave up: {}", engine.name(), e);
                    failures.push(format!("{}: {}", engine.name(), e));
                }
            }
        }

        Err(EngineError::AllEnginesFailed(failures))
    }

    /// Cache lookup first, then the engine chain; the flag marks a cache hit
    async fn translate_cached(&self, request: &EngineRequest) -> (Result<String, EngineError>, bool) {
        if let Some(text) = self.cache.get(request) {
            return (Ok(text), true);
        }
        let result = self.translate_with_fallback(request).await;
        if let Ok(text) = &result {
            self.cache.store(request, text);
        }
        (result, false)
    }

    fn request_for(&self, file: &TranslationFile, unit: &TranslationUnit) -> EngineRequest {
        EngineRequest::new(
            unit.source.clone(),
            file.source_language.as_deref().unwrap_or(&self.source_language),
            file.target_language.as_deref().unwrap_or(&self.target_language),
        )
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("█▓▒░"));
        bar
    }

    /// Translate every untranslated unit in place
    pub async fn fill_missing(&self, file: &mut TranslationFile) -> FillSummary {
        let pending: Vec<(usize, EngineRequest)> = file
            .units
            .iter()
            .enumerate()
            .filter(|(_, unit)| !unit.is_translated())
            .filter(|(_, unit)| {
                let has_source = !unit.source.trim().is_empty();
                if !has_source {
                    debug!("Skipping '{}': empty source text", unit.key);
                }
                has_source
            })
            .map(|(index, unit)| (index, self.request_for(file, unit)))
            .collect();

        let mut summary = FillSummary::default();
        if pending.is_empty() {
            info!("No missing translations to fill");
            return summary;
        }

        info!(
            "Filling {} missing translations with {}",
            pending.len(),
            self.engine_names().join(", ")
        );
        let progress = self.progress_bar(pending.len());

        let results = stream::iter(pending)
            .map(|(index, request)| {
                let progress = progress.clone();
                async move {
                    let (result, cached) = self.translate_cached(&request).await;
                    progress.inc(1);
                    (index, result, cached)
                }
            })
            .buffer_unordered(self.concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        progress.finish_and_clear();

        for (index, result, cached) in results {
            let unit = &mut file.units[index];
            match result {
                Ok(text) => {
                    unit.target = Some(text);
                    summary.filled += 1;
                    if cached {
                        summary.cached += 1;
                    }
                }
                Err(e) => {
                    warn!("Could not translate '{}': {}", unit.key, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Filled {} units ({} from cache), {} failed",
            summary.filled, summary.cached, summary.failed
        );
        summary
    }

    /// Ask every engine for a unit and rank the candidates, best first
    pub async fn compare(
        &self,
        file: &TranslationFile,
        unit: &TranslationUnit,
    ) -> Result<Vec<EngineCandidate>, EngineError> {
        if self.engines.is_empty() {
            return Err(EngineError::NotConfigured("no translation engines enabled".to_string()));
        }

        let request = &self.request_for(file, unit);
        let outcomes = join_all(self.engines.iter().map(|engine| async move {
            let outcome = self.translate_with_retries(engine.as_ref(), request).await;
            (engine.name().to_string(), outcome)
        }))
        .await;

        let mut candidates = Vec::new();
        let mut failures = Vec::new();
        for (engine, outcome) in outcomes {
            match outcome {
                Ok(text) => {
                    let issues = self.checker.check_text(&unit.key, &unit.source, &text);
                    let penalty = issue_penalty(&issues);
                    candidates.push(EngineCandidate { engine, text, issues, penalty });
                }
                Err(e) => failures.push(format!("{}: {}", engine, e)),
            }
        }

        if candidates.is_empty() {
            return Err(EngineError::AllEnginesFailed(failures));
        }

        // stable sort keeps priority order between equal penalties
        candidates.sort_by(|a, b| a.penalty.total_cmp(&b.penalty));
        Ok(candidates)
    }
}
