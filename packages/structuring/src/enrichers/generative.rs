//! Generative enrichment adapter.
//!
//! Wraps a generative model behind a fixed JSON-extraction prompt. The
//! model's reply is fence-stripped and parsed; parse failure, non-JSON
//! output, or a transport error all escalate like any other enrichment
//! failure.
//!
//! Model selection happens once at startup: [`GenerativeEnricher::probe`]
//! walks a prioritized candidate list with a trivial test prompt and keeps
//! the first model that answers. If none do, the adapter stays disabled
//! for the process lifetime and ingestion falls through to the heuristic
//! path after an NLP failure.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gemini_client::GeminiClient;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{EnrichError, EnrichResult};
use crate::traits::Enricher;
use crate::types::DocumentDraft;

/// Model identifiers tried, in order, after the configured preference.
pub const FALLBACK_MODELS: &[&str] = &[
    "models/gemini-1.5-flash",
    "models/gemini-1.5-pro",
    "models/gemini-pro",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Prompt sent to each probe candidate.
const PROBE_PROMPT: &str = "Hello";

/// Adapter for a probed, working generative model.
#[derive(Clone)]
pub struct GenerativeEnricher {
    client: GeminiClient,
    model: String,
}

/// The JSON object the extraction prompt asks the model for.
#[derive(Debug, Deserialize)]
struct GenerativePayload {
    title: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    emotions: Vec<String>,
    timestamp: Option<String>,
    /// Kept untyped: the merge contract only trusts a well-typed string.
    #[serde(default)]
    source_url: serde_json::Value,
    #[serde(default)]
    media_urls: Vec<String>,
}

impl GenerativeEnricher {
    /// Select a working model and build the adapter, or disable it.
    ///
    /// Candidates are the optional `preferred` identifier followed by
    /// [`FALLBACK_MODELS`]; each gets one test generation. Returns `None`
    /// when no candidate responds. Call once at startup - the decision is
    /// process-wide and must not be re-evaluated per request.
    pub async fn probe(client: GeminiClient, preferred: Option<&str>) -> Option<Self> {
        let preferred = preferred.map(str::trim).filter(|p| !p.is_empty());
        let candidates = preferred
            .into_iter()
            .chain(FALLBACK_MODELS.iter().copied());

        for model in candidates {
            debug!(model, "probing generative model");
            match client.generate_content(model, PROBE_PROMPT).await {
                Ok(_) => {
                    info!(model, "selected generative model");
                    return Some(Self {
                        client,
                        model: model.to_string(),
                    });
                }
                Err(e) => {
                    debug!(model, error = %e, "model probe failed");
                }
            }
        }

        warn!("no working generative model found, generative enrichment disabled");
        None
    }

    /// Build the adapter for a known-good model, skipping the probe.
    pub fn with_model(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// The model this adapter was bound to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn extraction_prompt(now: DateTime<Utc>) -> String {
        format!(
            r#"You are a structured JSON extraction engine. Analyze the raw text and output ONLY a valid JSON object.

Output keys:
- "title": short title
- "summary": 2-3 sentence summary
- "keywords": array of 3-6 keywords
- "emotions": array of 1-3 tones/emotions
- "timestamp": ISO timestamp from text if found, otherwise "{}"
- "source_url": main reference URL or null
- "media_urls": array of media URLs (may be empty)

Return ONLY JSON. No extra commentary."#,
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }

    fn draft_from_payload(payload: GenerativePayload) -> DocumentDraft {
        let timestamp = payload
            .timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));

        // Only a JSON string overrides the extractor's source candidate
        let source_url = payload
            .source_url
            .as_str()
            .map(|s| s.to_string());

        DocumentDraft {
            title: payload.title,
            summary: payload.summary,
            keywords: payload.keywords,
            emotions: payload.emotions,
            timestamp,
            source_url,
            media_urls: payload.media_urls,
            ..DocumentDraft::default()
        }
    }
}

/// Strip a Markdown code fence wrapping, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

#[async_trait]
impl Enricher for GenerativeEnricher {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn enrich(&self, text: &str) -> EnrichResult<DocumentDraft> {
        let prompt = format!(
            "{}\n\nText:\n{}",
            Self::extraction_prompt(Utc::now()),
            text
        );

        let reply = self
            .client
            .generate_content(&self.model, &prompt)
            .await
            .map_err(|e| EnrichError::Http(Box::new(e)))?;

        let payload: GenerativePayload = serde_json::from_str(strip_code_fences(&reply))
            .map_err(|e| EnrichError::Parse(e.to_string()))?;

        Ok(Self::draft_from_payload(payload))
    }
}
