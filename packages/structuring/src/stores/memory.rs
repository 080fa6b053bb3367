//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StructuringError};
use crate::traits::DocumentStore;
use crate::types::{DocumentRecord, StoredDocument};

/// In-memory document store.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
pub struct MemoryStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.documents.write().unwrap().clear();
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.read().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, record: &DocumentRecord) -> Result<StoredDocument> {
        let stored = StoredDocument {
            id: Uuid::new_v4().to_string(),
            record: record.clone(),
        };
        self.documents
            .write()
            .unwrap()
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, record: &DocumentRecord) -> Result<()> {
        let mut documents = self.documents.write().unwrap();
        match documents.get_mut(id) {
            Some(stored) => {
                stored.record = record.clone();
                Ok(())
            }
            None => Err(StructuringError::NotFound { id: id.to_string() }),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.documents.write().unwrap().remove(id);
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<StoredDocument>> {
        let mut documents: Vec<StoredDocument> =
            self.documents.read().unwrap().values().cloned().collect();
        documents.sort_by(|a, b| b.record.captured_at.cmp(&a.record.captured_at));
        documents.truncate(limit);
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record_at(title: &str, age_hours: i64) -> DocumentRecord {
        DocumentRecord {
            title: title.to_string(),
            summary: "s".to_string(),
            keywords: vec![],
            emotions: vec![],
            sentiment_score: None,
            source_url: None,
            media_urls: vec![],
            captured_at: Utc::now() - Duration::hours(age_hours),
            embedding: None,
            nlp_processed: false,
            raw_content: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&record_at("a", 0)).await.unwrap();
        let b = store.insert(&record_at("b", 0)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.document_count(), 2);
    }

    #[tokio::test]
    async fn test_list_orders_by_capture_time_desc() {
        let store = MemoryStore::new();
        store.insert(&record_at("oldest", 48)).await.unwrap();
        store.insert(&record_at("newest", 0)).await.unwrap();
        store.insert(&record_at("middle", 24)).await.unwrap();

        let listed = store.list(10).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|d| d.record.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);

        let limited = store.list(2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_id_errors() {
        let store = MemoryStore::new();
        let result = store.update("nope", &record_at("a", 0)).await;
        assert!(matches!(result, Err(StructuringError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let stored = store.insert(&record_at("before", 0)).await.unwrap();

        store
            .update(&stored.id, &record_at("after", 0))
            .await
            .unwrap();
        let listed = store.list(10).await.unwrap();
        assert_eq!(listed[0].record.title, "after");

        store.delete(&stored.id).await.unwrap();
        assert_eq!(store.document_count(), 0);
    }
}
