/*!
 * Mock engine implementations for testing and dry runs.
 *
 * - `MockEngine::working()` - prefixes the text with the target language
 * - `MockEngine::intermittent(n)` - fails every nth request
 * - `MockEngine::failing()` - always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{EngineRequest, TranslationEngine};
use crate::errors::EngineError;

/// Behavior mode for the mock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns `[<target>] <text>`
    Working,
    /// Returns the source text unchanged
    Echo,
    /// Always fails with an error
    Failing,
    /// Returns an empty translation
    Empty,
    /// Fails every Nth request
    Intermittent { fail_every: usize },
    /// Works after a delay
    Slow { delay_ms: u64 },
}

/// Mock engine with scripted behaviour
#[derive(Debug)]
pub struct MockEngine {
    name: String,
    behavior: MockBehavior,
    /// Shared between clones so intermittent failures stay in step
    request_count: Arc<AtomicUsize>,
    custom_response: Option<fn(&EngineRequest) -> String>,
}

impl MockEngine {
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    pub fn working() -> Self {
        Self::new("mock", MockBehavior::Working)
    }

    pub fn echo() -> Self {
        Self::new("mock-echo", MockBehavior::Echo)
    }

    pub fn failing() -> Self {
        Self::new("mock-failing", MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new("mock-empty", MockBehavior::Empty)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new("mock-intermittent", MockBehavior::Intermittent { fail_every })
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new("mock-slow", MockBehavior::Slow { delay_ms })
    }

    /// Rename the engine
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the `Working` output with a custom generator
    pub fn with_custom_response(mut self, generator: fn(&EngineRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn working_text(&self, request: &EngineRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[{}] {}", request.target_language, request.text),
        }
    }
}

impl Clone for MockEngine {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(&self, request: &EngineRequest) -> Result<String, EngineError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.working_text(request)),

            MockBehavior::Echo => Ok(request.text.clone()),

            MockBehavior::Failing => Err(EngineError::Api {
                status_code: 500,
                message: "Simulated engine failure".to_string(),
            }),

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(EngineError::Api {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.working_text(request))
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.working_text(request))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), EngineError> {
        match self.behavior {
            MockBehavior::Failing => Err(EngineError::RequestFailed(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
