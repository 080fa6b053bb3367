//! REST document store - client for a PostgREST-style document API.
//!
//! The hosted document service exposes one table over REST: inserts return
//! the created row (`Prefer: return=representation`), updates and deletes
//! filter by `id=eq.{id}`, and listing orders by capture time descending.
//! Any non-2xx answer is a storage error; the structuring work itself is
//! never retried here.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, StructuringError};
use crate::traits::DocumentStore;
use crate::types::{DocumentRecord, StoredDocument};

const DEFAULT_TABLE: &str = "content_documents";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Store backed by a remote document API.
#[derive(Clone)]
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
    timeout: Duration,
}

/// A returned row: the record plus its assigned id, which the service may
/// type as either a number or a string.
#[derive(Debug, Deserialize)]
struct Row {
    id: serde_json::Value,
    #[serde(flatten)]
    record: DocumentRecord,
}

impl Row {
    fn into_stored(self) -> StoredDocument {
        let id = match self.id.as_str() {
            Some(s) => s.to_string(),
            None => self.id.to_string(),
        };
        StoredDocument {
            id,
            record: self.record,
        }
    }
}

impl RestDocumentStore {
    /// Create a store for the service at `base_url` with the given key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different table name (default: `content_documents`).
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set the per-request timeout (default: 15s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn storage_error(context: &str, detail: impl std::fmt::Display) -> StructuringError {
        StructuringError::Storage(format!("{}: {}", context, detail).into())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Self::storage_error(
            "document API request failed",
            format!("{}: {}", status, body),
        ))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn insert(&self, record: &DocumentRecord) -> Result<StoredDocument> {
        debug!(table = %self.table, "inserting document");

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .timeout(self.timeout)
            .json(&[record])
            .send()
            .await
            .map_err(|e| Self::storage_error("insert failed", e))?;

        let response = Self::check_status(response).await?;

        let mut rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| Self::storage_error("unparsable insert response", e))?;

        if rows.is_empty() {
            return Err(Self::storage_error(
                "insert returned no rows",
                &self.table,
            ));
        }
        Ok(rows.remove(0).into_stored())
    }

    async fn update(&self, id: &str, record: &DocumentRecord) -> Result<()> {
        let response = self
            .client
            .patch(format!("{}?id=eq.{}", self.table_url(), id))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(record)
            .send()
            .await
            .map_err(|e| Self::storage_error("update failed", e))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}?id=eq.{}", self.table_url(), id))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::storage_error("delete failed", e))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<StoredDocument>> {
        let url = format!(
            "{}?select=*&order=captured_at.desc&limit={}",
            self.table_url(),
            limit
        );

        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::storage_error("list failed", e))?;

        let response = Self::check_status(response).await?;

        let rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| Self::storage_error("unparsable list response", e))?;

        Ok(rows.into_iter().map(Row::into_stored).collect())
    }
}
