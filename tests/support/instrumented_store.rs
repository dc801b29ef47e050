use std::sync::Mutex;

use async_trait::async_trait;
use postboard::{DocumentStore, InMemoryDocumentStore, Query, StoreError};
use serde_json::Value;
use tokio::sync::{oneshot, Notify};

/// Wraps an in-memory store, recording queried collections. It can park the
/// next query against one collection until released, or fail every query
/// against one collection.
pub struct InstrumentedStore {
    inner: InMemoryDocumentStore,
    queries: Mutex<Vec<String>>,
    gate: Mutex<Option<(String, oneshot::Receiver<()>)>>,
    parked: Notify,
    failing: Mutex<Option<String>>,
}

impl InstrumentedStore {
    pub fn new(inner: InMemoryDocumentStore) -> Self {
        Self {
            inner,
            queries: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
            parked: Notify::new(),
            failing: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &InMemoryDocumentStore {
        &self.inner
    }

    /// Collections queried so far, in call order.
    pub fn queried(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn clear_log(&self) {
        self.queries.lock().unwrap().clear();
    }

    /// Park the next query against `collection`. Sending on the returned
    /// channel lets it continue.
    pub fn hold_next_query(&self, collection: &str) -> oneshot::Sender<()> {
        let (release, wait) = oneshot::channel();
        *self.gate.lock().unwrap() = Some((collection.to_string(), wait));
        release
    }

    /// Resolves once a held query has been parked.
    pub async fn query_parked(&self) {
        self.parked.notified().await;
    }

    /// Fail queries against `collection` while other collections keep working.
    pub fn fail_queries_on(&self, collection: &str) {
        *self.failing.lock().unwrap() = Some(collection.to_string());
    }

    fn take_gate(&self, collection: &str) -> Option<oneshot::Receiver<()>> {
        let mut gate = self.gate.lock().unwrap();
        match gate.as_ref() {
            Some((held, _)) if held == collection => gate.take().map(|(_, wait)| wait),
            _ => None,
        }
    }
}

#[async_trait]
impl DocumentStore for InstrumentedStore {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        self.inner.set_document(collection, key, document).await
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.inner.delete_document(collection, key).await
    }

    async fn get_documents(&self, query: &Query) -> Result<Vec<(String, Value)>, StoreError> {
        self.queries
            .lock()
            .unwrap()
            .push(query.collection().to_string());

        if let Some(wait) = self.take_gate(query.collection()) {
            self.parked.notify_one();
            let _ = wait.await;
        }
        let failing = self.failing.lock().unwrap().clone();
        if failing.as_deref() == Some(query.collection()) {
            return Err(StoreError::Unavailable(format!(
                "{} is unreachable",
                query.collection()
            )));
        }
        self.inner.get_documents(query).await
    }
}
