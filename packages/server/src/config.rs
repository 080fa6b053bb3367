//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Environment-driven settings for the capture server.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the NLP analysis service.
    pub nlp_service_url: String,
    /// Unset disables generative enrichment entirely.
    pub gemini_api_key: Option<String>,
    /// Preferred model identifier, probed before the fallback list.
    pub gemini_model: Option<String>,
    /// `USE_AI=false` skips the generative path even with a key present.
    pub use_ai: bool,
    /// Remote document API; both unset falls back to the in-memory store.
    pub documents_api_url: Option<String>,
    pub documents_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            nlp_service_url: env::var("NLP_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5002".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            use_ai: env::var("USE_AI").map(|v| v != "false").unwrap_or(true),
            documents_api_url: env::var("DOCUMENTS_API_URL").ok().filter(|v| !v.is_empty()),
            documents_api_key: env::var("DOCUMENTS_API_KEY").ok().filter(|v| !v.is_empty()),
        })
    }
}
