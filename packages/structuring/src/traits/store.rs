//! Storage trait for structured documents.
//!
//! The persistence layer is an external collaborator: it assigns document
//! identity and owns durability. The pipeline itself only ever inserts;
//! update/delete/list exist for the dashboard-facing surface.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DocumentRecord, StoredDocument};

/// A document store keyed by store-assigned id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a record and return it with its assigned id.
    async fn insert(&self, record: &DocumentRecord) -> Result<StoredDocument>;

    /// Replace the record stored under `id`.
    async fn update(&self, id: &str, record: &DocumentRecord) -> Result<()>;

    /// Delete the record stored under `id`.
    async fn delete(&self, id: &str) -> Result<()>;

    /// List records, most recent capture first.
    async fn list(&self, limit: usize) -> Result<Vec<StoredDocument>>;
}
