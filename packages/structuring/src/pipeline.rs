//! Structuring pipeline - orchestrates extraction, enrichment, and merge.
//!
//! One call per ingestion request: validate, scan for URLs, walk the
//! enricher list until a strategy succeeds (the heuristic fallback cannot
//! fail), then merge the extractor's findings into the winning draft.
//! Enrichment failures are logged and escalated; the only error a caller
//! can see from [`Pipeline::structure`] is invalid input.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::error::{Result, StructuringError};
use crate::extract::{self, UrlFindings};
use crate::heuristic;
use crate::traits::Enricher;
use crate::types::{DocumentDraft, StructuredDocument, StructuringConfig};

/// The per-request orchestrator.
///
/// Holds the limits config and the ordered strategy list, both decided at
/// startup. Requests share it behind an `Arc` without synchronization -
/// nothing here is mutated after construction.
pub struct Pipeline {
    config: StructuringConfig,
    enrichers: Vec<Arc<dyn Enricher>>,
}

impl Pipeline {
    /// Create a pipeline with no enrichment strategies (heuristic only).
    pub fn new(config: StructuringConfig) -> Self {
        Self {
            config,
            enrichers: Vec::new(),
        }
    }

    /// Append a strategy; earlier additions are tried first.
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enrichers.push(enricher);
        self
    }

    /// Names of the active strategies, in priority order.
    pub fn enricher_names(&self) -> Vec<&'static str> {
        self.enrichers.iter().map(|e| e.name()).collect()
    }

    /// The limits this pipeline applies.
    pub fn config(&self) -> &StructuringConfig {
        &self.config
    }

    /// Turn one raw capture into a structured document.
    pub async fn structure(&self, raw_text: &str) -> Result<StructuredDocument> {
        if raw_text.chars().count() < self.config.min_input_chars {
            return Err(StructuringError::InvalidInput {
                reason: format!(
                    "text shorter than {} characters",
                    self.config.min_input_chars
                ),
            });
        }

        let ingested_at = Utc::now();

        // The extractor always runs; its findings survive whichever
        // strategy wins.
        let findings = extract::scan(raw_text);

        let mut draft = None;
        for enricher in &self.enrichers {
            match enricher.enrich(raw_text).await {
                Ok(d) => {
                    info!(stage = enricher.name(), "enrichment succeeded");
                    draft = Some(d);
                    break;
                }
                Err(e) => {
                    warn!(stage = enricher.name(), error = %e, "enrichment failed, escalating");
                }
            }
        }

        let draft = match draft {
            Some(d) => d,
            None => {
                debug!("structuring without enrichment");
                heuristic::structure(raw_text, &self.config)
            }
        };

        Ok(finalize(
            draft,
            &findings,
            raw_text,
            ingested_at,
            &self.config,
        ))
    }
}

/// Merge step: the only place enrichment output and extractor findings
/// combine. The draft's fields win where present and well-typed; gaps are
/// filled from the scan, the heuristic title, and the ingestion time.
fn finalize(
    draft: DocumentDraft,
    findings: &UrlFindings,
    raw_text: &str,
    ingested_at: DateTime<Utc>,
    config: &StructuringConfig,
) -> StructuredDocument {
    let title = draft
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| heuristic::extract_title(raw_text, config.title_max_chars));
    let title = heuristic::truncate_chars(&title, config.title_max_chars).to_string();

    let summary = draft
        .summary
        .unwrap_or_else(|| heuristic::excerpt_summary(raw_text, config));

    // Union, not overwrite: draft list first, then the independent scan
    let mut media: IndexSet<String> = draft.media_urls.into_iter().collect();
    media.extend(findings.media_urls.iter().cloned());

    StructuredDocument {
        title,
        summary,
        keywords: draft.keywords,
        emotions: draft.emotions,
        sentiment_score: draft.sentiment_score,
        timestamp: draft.timestamp.unwrap_or(ingested_at),
        source_url: draft.source_url.or_else(|| findings.source_url.clone()),
        media_urls: media.into_iter().collect(),
        embedding: draft.embedding,
        nlp_processed: draft.nlp_processed,
        raw_excerpt: draft.raw_excerpt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StructuringConfig {
        StructuringConfig::default()
    }

    fn scan_of(text: &str) -> UrlFindings {
        extract::scan(text)
    }

    #[test]
    fn test_finalize_fills_gaps_from_scan() {
        let raw = "Title: Test Page\nURL: http://example.com\n\nbody text";
        let document = finalize(
            DocumentDraft::default(),
            &scan_of(raw),
            raw,
            Utc::now(),
            &config(),
        );

        assert_eq!(document.title, "Test Page");
        assert_eq!(document.source_url.as_deref(), Some("http://example.com"));
        assert!(document.media_urls.is_empty());
    }

    #[test]
    fn test_finalize_media_union_dedups() {
        let raw = "see http://x.com/a.png and http://x.com/b.png";
        let draft = DocumentDraft {
            media_urls: vec![
                "http://x.com/a.png".to_string(),
                "http://model.example/c.gif".to_string(),
            ],
            ..DocumentDraft::default()
        };

        let document = finalize(draft, &scan_of(raw), raw, Utc::now(), &config());

        assert_eq!(
            document.media_urls,
            vec![
                "http://x.com/a.png",
                "http://model.example/c.gif",
                "http://x.com/b.png",
            ]
        );
    }

    #[test]
    fn test_finalize_draft_source_wins() {
        let raw = "body with http://scanned.example/page inside";
        let draft = DocumentDraft {
            source_url: Some("http://draft.example/post".to_string()),
            ..DocumentDraft::default()
        };

        let document = finalize(draft, &scan_of(raw), raw, Utc::now(), &config());
        assert_eq!(
            document.source_url.as_deref(),
            Some("http://draft.example/post")
        );
    }

    #[test]
    fn test_finalize_draft_timestamp_wins() {
        let supplied = "2024-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let draft = DocumentDraft {
            timestamp: Some(supplied),
            ..DocumentDraft::default()
        };

        let document = finalize(
            draft,
            &UrlFindings::default(),
            "some raw body text",
            Utc::now(),
            &config(),
        );
        assert_eq!(document.timestamp, supplied);
    }

    #[test]
    fn test_finalize_blank_draft_title_falls_back() {
        let raw = "Actual Heading\nand some body";
        let draft = DocumentDraft {
            title: Some("   ".to_string()),
            ..DocumentDraft::default()
        };

        let document = finalize(draft, &UrlFindings::default(), raw, Utc::now(), &config());
        assert_eq!(document.title, "Actual Heading");
    }

    #[test]
    fn test_finalize_truncates_draft_title() {
        let draft = DocumentDraft {
            title: Some("t".repeat(500)),
            ..DocumentDraft::default()
        };

        let document = finalize(
            draft,
            &UrlFindings::default(),
            "raw body",
            Utc::now(),
            &config(),
        );
        assert_eq!(document.title.chars().count(), 100);
    }
}
