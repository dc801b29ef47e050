//! DocumentStore - Abstract async access to remote document collections.

use async_trait::async_trait;
use serde_json::Value;

use super::{Query, StoreError};

/// Remote collection client.
///
/// Every call targets either a single document or an independent query, so
/// implementations must be safe to call concurrently from several tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create or overwrite the document stored under `key`.
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError>;

    /// Delete the document stored under `key`. Deleting an absent document
    /// succeeds.
    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// Run a query and return the matching documents with their keys.
    async fn get_documents(&self, query: &Query) -> Result<Vec<(String, Value)>, StoreError>;
}
