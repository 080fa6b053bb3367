//! Enricher trait - one attemptable structuring strategy.

use async_trait::async_trait;

use crate::error::EnrichResult;
use crate::types::DocumentDraft;

/// A strategy that can turn raw capture text into a document draft.
///
/// Implementations wrap external services (the NLP analyzer, a generative
/// model). The pipeline walks an ordered list of these and adopts the first
/// success; an error escalates to the next strategy and is never fatal to
/// the request. An enricher must return either a complete draft or an
/// error - never a half-populated draft for a failed call.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Stage name used in escalation logs.
    fn name(&self) -> &'static str;

    /// Attempt to produce a draft from the raw capture text.
    async fn enrich(&self, text: &str) -> EnrichResult<DocumentDraft>;
}
