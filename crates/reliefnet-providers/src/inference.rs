//! Generative-inference adapter: location extraction and image verification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::ProviderError;
use crate::traits::{ImageVerifier, LocationExtractor};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TEXT_MODEL: &str = "gemini-pro";
const DEFAULT_VISION_MODEL: &str = "gemini-pro-vision";

/// Fallback literal when a location cannot be read from the response.
pub const UNKNOWN_LOCATION: &str = "Unknown";
/// Fallback literal when a verification text cannot be read from the response.
pub const NO_RESULT: &str = "No result";

/// Connection settings for the inference provider.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// API base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    /// API key, sent as the `key` query parameter.
    pub api_key: String,
    /// Model used for text prompts.
    pub text_model: String,
    /// Model used for image-analysis prompts.
    pub vision_model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GenAiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Wire shape of a generate-content response. Every field is optional so a
/// degenerate response deserializes instead of failing; missing pieces
/// resolve to the fallback literal at the call site.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// First candidate's first content part, when present.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for a hosted generative-inference API.
///
/// Stateless apart from the pooled HTTP client; implements both
/// [`LocationExtractor`] and [`ImageVerifier`].
pub struct GenAiClient {
    http: Client,
    config: GenAiConfig,
}

impl GenAiClient {
    pub fn new(config: GenAiConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::request(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::unexpected_status(status.as_u16(), body));
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;
        Ok(decoded.first_text())
    }
}

#[async_trait]
impl LocationExtractor for GenAiClient {
    async fn extract(&self, text: &str) -> Result<String, ProviderError> {
        let prompt = format!("Extract location from: {text}");
        let answer = self.generate(&self.config.text_model, &prompt).await?;
        if answer.is_none() {
            tracing::debug!("inference response missing location, using fallback");
        }
        Ok(answer.unwrap_or_else(|| UNKNOWN_LOCATION.to_string()))
    }
}

#[async_trait]
impl ImageVerifier for GenAiClient {
    async fn verify(&self, image_url: &str) -> Result<String, ProviderError> {
        let prompt =
            format!("Analyze image at {image_url} for signs of manipulation or disaster context.");
        let answer = self.generate(&self.config.vision_model, &prompt).await?;
        if answer.is_none() {
            tracing::debug!("inference response missing verification, using fallback");
        }
        Ok(answer.unwrap_or_else(|| NO_RESULT.to_string()))
    }
}
