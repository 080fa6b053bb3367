//! Document types - drafts, finished documents, and persistence records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How much of the raw capture the persistence layer retains, regardless
/// of which enrichment strategy produced the document.
pub const RAW_CONTENT_MAX_CHARS: usize = 5000;

/// The normalized output record of one ingestion request.
///
/// Constructed exactly once per request by the pipeline's merge step and
/// immutable afterwards. Invariants:
/// - `title` is non-empty and at most the configured maximum length
/// - `timestamp` is always set (enricher-supplied or ingestion time)
/// - `media_urls` is deduplicated, in first-seen order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    /// Sentiment/tone labels; the NLP path yields exactly one.
    pub emotions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub source_url: Option<String>,
    pub media_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// True only when the NLP service produced this document.
    pub nlp_processed: bool,
    /// Leading slice of the raw capture, retained on the heuristic path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_excerpt: Option<String>,
}

/// The partial document a single enrichment strategy produces.
///
/// Every field an enricher may leave unset is optional here; the pipeline's
/// merge step fills the gaps from the URL extractor's findings, the
/// heuristic title, and the ingestion time. Exactly one draft contributes
/// to a given [`StructuredDocument`] - strategies are never mixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDraft {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub keywords: Vec<String>,
    pub emotions: Vec<String>,
    pub sentiment_score: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub source_url: Option<String>,
    pub media_urls: Vec<String>,
    pub embedding: Option<Vec<f32>>,
    pub nlp_processed: bool,
    pub raw_excerpt: Option<String>,
}

/// The insert payload handed to a document store.
///
/// Identical to the document except that the capture instant is stored as
/// `captured_at` and the leading slice of the raw text is always retained,
/// whichever strategy ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub emotions: Vec<String>,
    pub sentiment_score: Option<f64>,
    pub source_url: Option<String>,
    pub media_urls: Vec<String>,
    pub captured_at: DateTime<Utc>,
    pub embedding: Option<Vec<f32>>,
    pub nlp_processed: bool,
    pub raw_content: Option<String>,
}

impl DocumentRecord {
    /// Build the persistence record for a finished document.
    pub fn from_document(document: &StructuredDocument, raw_text: &str) -> Self {
        Self {
            title: document.title.clone(),
            summary: document.summary.clone(),
            keywords: document.keywords.clone(),
            emotions: document.emotions.clone(),
            sentiment_score: document.sentiment_score,
            source_url: document.source_url.clone(),
            media_urls: document.media_urls.clone(),
            captured_at: document.timestamp,
            embedding: document.embedding.clone(),
            nlp_processed: document.nlp_processed,
            raw_content: Some(
                crate::heuristic::truncate_chars(raw_text, RAW_CONTENT_MAX_CHARS).to_string(),
            ),
        }
    }
}

/// A record together with its store-assigned identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    #[serde(flatten)]
    pub record: DocumentRecord,
}
