//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the structuring
//! library without making real network calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{EnrichError, EnrichResult, Result, StructuringError};
use crate::traits::{DocumentStore, Enricher};
use crate::types::{DocumentDraft, DocumentRecord, StoredDocument};

/// A mock enricher with a fixed outcome and call tracking.
///
/// Build one per strategy under test, keep a clone of the `Arc`, and
/// assert on [`MockEnricher::call_count`] after driving the pipeline.
pub struct MockEnricher {
    name: &'static str,
    outcome: MockOutcome,
    calls: Arc<RwLock<Vec<String>>>,
}

enum MockOutcome {
    Success(DocumentDraft),
    Failure(String),
}

impl MockEnricher {
    /// An enricher that always returns the given draft.
    pub fn succeeding(name: &'static str, draft: DocumentDraft) -> Self {
        Self {
            name,
            outcome: MockOutcome::Success(draft),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// An enricher that always fails with a parse error.
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            outcome: MockOutcome::Failure("forced failure".to_string()),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of times `enrich` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The raw texts this mock received, in call order.
    pub fn received_texts(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Enricher for MockEnricher {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn enrich(&self, text: &str) -> EnrichResult<DocumentDraft> {
        self.calls.write().unwrap().push(text.to_string());
        match &self.outcome {
            MockOutcome::Success(draft) => Ok(draft.clone()),
            MockOutcome::Failure(reason) => Err(EnrichError::Parse(reason.clone())),
        }
    }
}

/// A store whose every operation fails.
///
/// Exercises the "structuring succeeded, storage failed" path.
#[derive(Default)]
pub struct FailingStore;

impl FailingStore {
    pub fn new() -> Self {
        Self
    }

    fn error() -> StructuringError {
        StructuringError::Storage("forced storage failure".into())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, _record: &DocumentRecord) -> Result<StoredDocument> {
        Err(Self::error())
    }

    async fn update(&self, _id: &str, _record: &DocumentRecord) -> Result<()> {
        Err(Self::error())
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Err(Self::error())
    }

    async fn list(&self, _limit: usize) -> Result<Vec<StoredDocument>> {
        Err(Self::error())
    }
}
