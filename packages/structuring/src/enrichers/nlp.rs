//! NLP service adapter.
//!
//! Sends the raw text to an external analysis service and maps its payload
//! into a document draft. Any transport error, non-2xx status, or
//! malformed payload is a uniform [`EnrichError`] - the pipeline never
//! sees a half-populated draft from this stage.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{EnrichError, EnrichResult};
use crate::traits::Enricher;
use crate::types::DocumentDraft;

/// Sentiment label used when the service omits one.
const NEUTRAL_LABEL: &str = "NEUTRAL";

/// Per-request timeout; a hung analyzer must not stall ingestion.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter for the `POST {base}/analyze` NLP service.
#[derive(Clone)]
pub struct NlpEnricher {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// Payload shape of a successful analysis.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    summary: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    sentiment: Option<SentimentJson>,
    embedding: Option<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct SentimentJson {
    label: Option<String>,
    score: Option<f64>,
}

impl NlpEnricher {
    /// Create an adapter for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout (default: 30s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn draft_from_response(response: AnalyzeResponse) -> DocumentDraft {
        let label = response
            .sentiment
            .as_ref()
            .and_then(|s| s.label.clone())
            .unwrap_or_else(|| NEUTRAL_LABEL.to_string());
        let score = response
            .sentiment
            .as_ref()
            .and_then(|s| s.score)
            .unwrap_or(0.0);

        DocumentDraft {
            summary: response.summary,
            keywords: response.keywords,
            emotions: vec![label],
            sentiment_score: Some(score),
            embedding: response.embedding,
            nlp_processed: true,
            ..DocumentDraft::default()
        }
    }
}

#[async_trait]
impl Enricher for NlpEnricher {
    fn name(&self) -> &'static str {
        "nlp"
    }

    async fn enrich(&self, text: &str) -> EnrichResult<DocumentDraft> {
        let url = format!("{}/analyze", self.base_url);

        debug!(url = %url, "calling NLP service");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|e| EnrichError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Api { status, body });
        }

        let payload: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::Parse(e.to_string()))?;

        Ok(Self::draft_from_response(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_mapping() {
        let payload: AnalyzeResponse = serde_json::from_str(
            r#"{
                "summary": "S",
                "keywords": ["a", "b"],
                "sentiment": {"label": "POSITIVE", "score": 0.9},
                "embedding": [0.1, 0.2]
            }"#,
        )
        .unwrap();

        let draft = NlpEnricher::draft_from_response(payload);

        assert_eq!(draft.summary.as_deref(), Some("S"));
        assert_eq!(draft.keywords, vec!["a", "b"]);
        assert_eq!(draft.emotions, vec!["POSITIVE"]);
        assert_eq!(draft.sentiment_score, Some(0.9));
        assert_eq!(draft.embedding, Some(vec![0.1, 0.2]));
        assert!(draft.nlp_processed);
    }

    #[test]
    fn test_sparse_payload_defaults() {
        let payload: AnalyzeResponse = serde_json::from_str("{}").unwrap();
        let draft = NlpEnricher::draft_from_response(payload);

        assert!(draft.summary.is_none());
        assert!(draft.keywords.is_empty());
        assert_eq!(draft.emotions, vec![NEUTRAL_LABEL]);
        assert_eq!(draft.sentiment_score, Some(0.0));
        assert!(draft.embedding.is_none());
        assert!(draft.nlp_processed);
    }

    #[test]
    fn test_sentiment_without_score() {
        let payload: AnalyzeResponse =
            serde_json::from_str(r#"{"sentiment": {"label": "NEGATIVE"}}"#).unwrap();
        let draft = NlpEnricher::draft_from_response(payload);

        assert_eq!(draft.emotions, vec!["NEGATIVE"]);
        assert_eq!(draft.sentiment_score, Some(0.0));
    }

    #[test]
    fn test_draft_never_sets_title_or_source() {
        let payload: AnalyzeResponse = serde_json::from_str(r#"{"summary": "S"}"#).unwrap();
        let draft = NlpEnricher::draft_from_response(payload);

        // Title and source come from the extractor/heuristic in the merge step
        assert!(draft.title.is_none());
        assert!(draft.source_url.is_none());
        assert!(draft.timestamp.is_none());
        assert!(draft.media_urls.is_empty());
    }
}
