//! Collection - Typed accessor for one named collection of a DocumentStore.

use std::marker::PhantomData;

use super::{Document, DocumentStore, Query, StoreError};

/// Typed view over a single collection.
///
/// Encodes documents with serde_json on the way in and decodes them on the
/// way out, turning failures into typed [`StoreError`]s instead of panics.
pub struct Collection<'a, S: ?Sized, D> {
    store: &'a S,
    name: &'a str,
    _marker: PhantomData<D>,
}

impl<'a, S: DocumentStore + ?Sized, D: Document> Collection<'a, S, D> {
    pub fn new(store: &'a S, name: &'a str) -> Self {
        Self {
            store,
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Start a query against this collection.
    pub fn query(&self) -> Query {
        Query::new(self.name)
    }

    /// Create or overwrite a document under its own key.
    pub async fn set(&self, document: &D) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(document).map_err(|e| StoreError::Encoding(e.to_string()))?;
        self.store
            .set_document(self.name, &document.key(), value)
            .await
    }

    /// Delete a document by key. Absent keys are a no-op.
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.delete_document(self.name, key).await
    }

    /// Run a query and decode every returned document.
    pub async fn get(&self, query: &Query) -> Result<Vec<D>, StoreError> {
        let documents = self.store.get_documents(query).await?;
        documents
            .into_iter()
            .map(|(key, value)| {
                serde_json::from_value(value).map_err(|e| StoreError::Decoding {
                    collection: self.name.to_string(),
                    key,
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

/// Extension trait for typed collection access on any DocumentStore.
pub trait CollectionsExt: DocumentStore {
    /// Get a typed accessor for a named collection.
    fn collection<'a, D: Document>(&'a self, name: &'a str) -> Collection<'a, Self, D> {
        Collection::new(self, name)
    }
}

impl<S: DocumentStore + ?Sized> CollectionsExt for S {}
