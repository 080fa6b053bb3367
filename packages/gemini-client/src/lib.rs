//! Pure Google Gemini REST API client
//!
//! A clean, minimal client for the Gemini generative-language API with no
//! domain-specific logic. Supports content generation and model listing.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Generate text
//! let text = client.generate_content("gemini-1.5-flash", "Hello!").await?;
//!
//! // Discover available models
//! let models = client.list_models().await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
    ModelInfo, Part,
};

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Per-request timeout. A hung upstream must not hold a request open
/// indefinitely; callers can override with [`GeminiClient::with_timeout`].
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout (default: 30s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Generate text from a prompt with the given model.
    ///
    /// `model` may be a bare identifier (`gemini-1.5-flash`) or fully
    /// qualified (`models/gemini-1.5-flash`).
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_path(model)
        );
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(model, "sending generateContent request");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(format!("{}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        parsed
            .text()
            .ok_or_else(|| GeminiError::Parse("no candidates in response".into()))
    }

    /// List the models available to this API key.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(format!("{}: {}", status, body)));
        }

        let parsed: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        Ok(parsed.models)
    }

    /// Qualify a model identifier with the `models/` prefix if missing.
    fn model_path(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        }
    }
}
