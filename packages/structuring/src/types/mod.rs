//! Data types for the structuring pipeline.

pub mod config;
pub mod document;

pub use config::StructuringConfig;
pub use document::{DocumentDraft, DocumentRecord, StoredDocument, StructuredDocument};
