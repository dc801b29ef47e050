//! InMemoryDocumentStore - BTreeMap-backed document store for testing and development.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::query::field_value;
use super::{DocumentStore, Filter, Query, StoreError};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// In-memory document store.
///
/// Documents of a collection are kept in key order, which is the store's
/// natural order: ordered queries sort stably on top of it. Clone-friendly
/// via Arc, so clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<Collections>>,
    unavailable: Arc<AtomicBool>,
    failing_writes: Arc<AtomicBool>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make subsequent writes fail while queries keep working.
    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    /// Number of documents stored in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.storage
            .read()
            .map(|storage| storage.get(collection).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    /// Raw access to a stored document, bypassing fault injection.
    pub fn raw_document(&self, collection: &str, key: &str) -> Option<Value> {
        self.storage
            .read()
            .ok()?
            .get(collection)?
            .get(key)
            .cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("backend unreachable".into()));
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        self.check_available()?;
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write rejected by backend".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        storage
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        if let Some(documents) = storage.get_mut(collection) {
            documents.remove(key);
        }
        Ok(())
    }

    async fn get_documents(&self, query: &Query) -> Result<Vec<(String, Value)>, StoreError> {
        self.check_available()?;
        for filter in query.filters() {
            if let Filter::In(field, values) = filter {
                if values.is_empty() {
                    return Err(StoreError::InvalidQuery(format!(
                        "'in' filter on {} requires at least one value",
                        field
                    )));
                }
            }
        }

        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let Some(documents) = storage.get(query.collection()) else {
            return Ok(Vec::new());
        };

        let mut results: Vec<(String, Value)> = documents
            .iter()
            .filter(|(_, document)| query.filters().iter().all(|f| matches(document, f)))
            .map(|(key, document)| (key.clone(), document.clone()))
            .collect();

        if let Some(order) = query.order() {
            // Documents without the ordered field are not part of the result.
            results.retain(|(_, document)| field_value(document, &order.field).is_some());
            results.sort_by(|(_, a), (_, b)| {
                let ordering = compare_values(
                    field_value(a, &order.field),
                    field_value(b, &order.field),
                );
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        Ok(results)
    }
}

fn matches(document: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, expected) => field_value(document, field) == Some(expected),
        Filter::In(field, candidates) => field_value(document, field)
            .map(|value| candidates.contains(value))
            .unwrap_or(false),
    }
}

/// Sort key of a field value. Values of different kinds never compare
/// equal: numbers sort before datetimes, datetimes before other strings,
/// then booleans, then everything else.
enum SortKey<'a> {
    Number(f64),
    DateTime(DateTime<FixedOffset>),
    Text(&'a str),
    Bool(bool),
    Other,
}

impl SortKey<'_> {
    fn of(value: &Value) -> SortKey<'_> {
        match value {
            Value::Number(number) => SortKey::Number(number.as_f64().unwrap_or(f64::NAN)),
            Value::String(text) => match DateTime::parse_from_rfc3339(text) {
                Ok(datetime) => SortKey::DateTime(datetime),
                Err(_) => SortKey::Text(text),
            },
            Value::Bool(flag) => SortKey::Bool(*flag),
            _ => SortKey::Other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::DateTime(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Bool(_) => 3,
            SortKey::Other => 4,
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    match (a.map(SortKey::of), b.map(SortKey::of)) {
        (Some(a), Some(b)) => match (&a, &b) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            _ => a.rank().cmp(&b.rank()),
        },
        (Some(_), None) => CmpOrdering::Less,
        (None, Some(_)) => CmpOrdering::Greater,
        (None, None) => CmpOrdering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_overwrites_and_delete_is_idempotent() {
        let store = InMemoryDocumentStore::new();
        store
            .set_document("posts", "a", json!({ "title": "one" }))
            .await
            .unwrap();
        store
            .set_document("posts", "a", json!({ "title": "two" }))
            .await
            .unwrap();
        assert_eq!(store.len("posts"), 1);
        assert_eq!(
            store.raw_document("posts", "a"),
            Some(json!({ "title": "two" }))
        );

        store.delete_document("posts", "a").await.unwrap();
        store.delete_document("posts", "a").await.unwrap();
        store.delete_document("missing", "a").await.unwrap();
        assert_eq!(store.len("posts"), 0);
    }

    #[tokio::test]
    async fn ordering_uses_datetimes_and_is_stable() {
        let store = InMemoryDocumentStore::new();
        store
            .set_document("posts", "a", json!({ "ts": "2024-01-01T10:00:00.5Z" }))
            .await
            .unwrap();
        store
            .set_document("posts", "b", json!({ "ts": "2024-01-01T10:00:00Z" }))
            .await
            .unwrap();
        store
            .set_document("posts", "c", json!({ "ts": "2024-01-01T10:00:00.5Z" }))
            .await
            .unwrap();
        store
            .set_document("posts", "d", json!({ "untimed": true }))
            .await
            .unwrap();

        let query = Query::new("posts").order_by("ts", true);
        let keys: Vec<String> = store
            .get_documents(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn mixed_kinds_sort_by_kind_then_value() {
        let store = InMemoryDocumentStore::new();
        for (key, ts) in [
            ("a", json!("2024-01-01T10:00:00+05:00")),
            ("b", json!("2024-01-01T06:00:00Z")),
            ("c", json!("2024-01-01T08:00:00 local")),
            ("d", json!(7)),
            ("e", json!("draft")),
            ("f", json!(-2.5)),
        ] {
            store
                .set_document("posts", key, json!({ "ts": ts }))
                .await
                .unwrap();
        }

        let keys = |documents: Vec<(String, Value)>| -> Vec<String> {
            documents.into_iter().map(|(key, _)| key).collect()
        };

        let ascending = store
            .get_documents(&Query::new("posts").order_by("ts", false))
            .await
            .unwrap();
        assert_eq!(keys(ascending), vec!["f", "d", "a", "b", "c", "e"]);

        let descending = store
            .get_documents(&Query::new("posts").order_by("ts", true))
            .await
            .unwrap();
        assert_eq!(keys(descending), vec!["e", "c", "b", "a", "d", "f"]);
    }

    #[tokio::test]
    async fn filters_match_nested_fields_and_sets() {
        let store = InMemoryDocumentStore::new();
        for (key, author) in [("a", "u1"), ("b", "u2"), ("c", "u1")] {
            store
                .set_document(
                    "posts",
                    key,
                    json!({ "id": key, "author": { "id": author } }),
                )
                .await
                .unwrap();
        }

        let by_author = Query::new("posts").where_eq("author.id", "u1");
        assert_eq!(store.get_documents(&by_author).await.unwrap().len(), 2);

        let by_id = Query::new("posts").where_in("id", vec!["b", "zzz"]);
        let found = store.get_documents(&by_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "b");

        let empty_in = Query::new("posts").where_in("id", Vec::<String>::new());
        assert!(matches!(
            store.get_documents(&empty_in).await,
            Err(StoreError::InvalidQuery(_))
        ));
    }

    #[tokio::test]
    async fn fault_injection() {
        let store = InMemoryDocumentStore::new();
        store.fail_writes(true);
        assert!(store
            .set_document("posts", "a", json!({}))
            .await
            .is_err());
        assert!(store.get_documents(&Query::new("posts")).await.is_ok());

        store.fail_writes(false);
        store.set_unavailable(true);
        assert!(matches!(
            store.get_documents(&Query::new("posts")).await,
            Err(StoreError::Unavailable(_))
        ));
        store.set_unavailable(false);
        store.set_document("posts", "a", json!({})).await.unwrap();
        assert_eq!(store.len("posts"), 1);
    }
}
