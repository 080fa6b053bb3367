//! Content Structuring Library
//!
//! Turns raw web-page text (from a browser extension or manual submission)
//! into a normalized structured document: title, summary, keywords,
//! emotions, source and media URLs, optional embedding.
//!
//! # Design
//!
//! Enrichment is a deterministic fallback chain. Each strategy either
//! produces a complete draft or fails; the pipeline walks them in priority
//! order and the local heuristic guarantees a result when every external
//! strategy is down:
//!
//! 1. External NLP service (summary, keywords, sentiment, embedding)
//! 2. Generative model with a fixed JSON-extraction prompt
//! 3. Heuristic extraction from the raw text alone
//!
//! Independently of the chain, a pure URL scan always runs; its media
//! findings are unioned into - never overwritten by - whichever strategy
//! wins.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use structuring::{MemoryStore, NlpEnricher, Pipeline, StructuringConfig};
//!
//! let pipeline = Pipeline::new(StructuringConfig::default())
//!     .with_enricher(Arc::new(NlpEnricher::new("http://localhost:5002")));
//!
//! let document = pipeline.structure(raw_text).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Enricher, DocumentStore)
//! - [`types`] - Documents, drafts, persistence records
//! - [`extract`] - URL scanning and media classification
//! - [`heuristic`] - Last-resort structuring from raw text
//! - [`enrichers`] - NLP service and generative-model adapters
//! - [`pipeline`] - The orchestrator
//! - [`stores`] - Storage implementations (memory, REST)
//! - [`testing`] - Mock implementations for testing

pub mod enrichers;
pub mod error;
pub mod extract;
pub mod heuristic;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{EnrichError, StructuringError};
pub use traits::{DocumentStore, Enricher};
pub use types::{
    DocumentDraft, DocumentRecord, StoredDocument, StructuredDocument, StructuringConfig,
};

// Re-export the pipeline and extractor entry points
pub use extract::{scan, UrlFindings};
pub use pipeline::Pipeline;

// Re-export enrichers
pub use enrichers::{GenerativeEnricher, NlpEnricher, FALLBACK_MODELS};

// Re-export stores
pub use stores::{MemoryStore, RestDocumentStore};
