/*!
 * Translation engines used to fill gaps and compare candidates.
 *
 * Engines are interchangeable behind [`TranslationEngine`]:
 * - `http`: a generic JSON-over-HTTP engine
 * - `mock`: scripted behaviours for tests and dry runs
 *
 * `orchestrator` chains engines with retries and fallback, and `cache`
 * remembers successful translations for the run.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::EngineError;

// Re-export main types for easier usage
pub use self::cache::{CacheStats, TranslationCache};
pub use self::http::HttpEngine;
pub use self::mock::{MockBehavior, MockEngine};
pub use self::orchestrator::{EngineCandidate, EngineOrchestrator, FillSummary, RetryPolicy};

/// A single text to translate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

impl EngineRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Common trait for all translation engines
///
/// Implementations must be shareable across tasks so the orchestrator can
/// run requests concurrently.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Name used in logs and reports
    fn name(&self) -> &str;

    /// Translate one text
    async fn translate(&self, request: &EngineRequest) -> Result<String, EngineError>;

    /// Test the connection to the engine
    async fn test_connection(&self) -> Result<(), EngineError>;
}

pub mod cache;
pub mod http;
pub mod mock;
pub mod orchestrator;
