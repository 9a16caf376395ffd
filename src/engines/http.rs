/*!
 * Generic JSON-over-HTTP translation engine.
 *
 * Speaks the request/response shape shared by self-hosted translation
 * servers: a POST of `{"q", "source", "target", "format", "api_key"}`
 * answered with `{"translatedText": "..."}`.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{EngineRequest, TranslationEngine};
use crate::errors::EngineError;

/// Request body sent to the engine
#[derive(Debug, Serialize)]
pub struct HttpTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Response body returned by the engine
#[derive(Debug, Deserialize)]
pub struct HttpTranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// HTTP engine client
#[derive(Debug, Clone)]
pub struct HttpEngine {
    name: String,
    endpoint: Url,
    api_key: Option<String>,
    client: Client,
}

impl HttpEngine {
    /// Create an engine for an endpoint URL
    pub fn new(
        name: impl Into<String>,
        endpoint: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        let endpoint = Url::parse(endpoint).map_err(|e| {
            EngineError::NotConfigured(format!("{}: invalid endpoint '{}': {}", name, endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::NotConfigured(format!("{}: failed to build HTTP client: {}", name, e)))?;

        Ok(Self {
            name,
            endpoint,
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn body<'a>(&'a self, request: &'a EngineRequest) -> HttpTranslateRequest<'a> {
        HttpTranslateRequest {
            q: &request.text,
            source: &request.source_language,
            target: &request.target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }
}

#[async_trait]
impl TranslationEngine for HttpEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(&self, request: &EngineRequest) -> Result<String, EngineError> {
        debug!("{}: translating {} chars", self.name, request.text.chars().count());

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(&self.body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("{} API error ({}): {}", self.name, status, error_text);
            return Err(EngineError::Api {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body: HttpTranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;

        Ok(body.translated_text)
    }

    async fn test_connection(&self) -> Result<(), EngineError> {
        let probe = EngineRequest::new("Hello", "en", "en");
        self.translate(&probe).await.map(|_| ())
    }
}
