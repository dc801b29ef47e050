//! Store - the remote document collections behind the posts repository.
//!
//! A document store holds JSON documents grouped into named collections and
//! keyed by string. It answers filtered, ordered queries and supports
//! per-document create/overwrite/delete. Typed access goes through
//! [`Collection`], obtained from any store via [`CollectionsExt`].
//!
//! ## Example
//!
//! ```ignore
//! use postboard::{CollectionsExt, InMemoryDocumentStore, Post};
//!
//! let store = InMemoryDocumentStore::new();
//! store.collection::<Post>("posts").set(&post).await?;
//!
//! let query = store
//!     .collection::<Post>("posts")
//!     .query()
//!     .where_eq("author.id", "user-1")
//!     .order_by("timestamp", true);
//! let posts = store.collection::<Post>("posts").get(&query).await?;
//! ```

mod collection;
mod document_store;
mod in_memory;
mod query;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for entities that are persisted as documents.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Returns the storage key of this document within its collection.
    fn key(&self) -> String;
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A value could not be serialized into a document.
    Encoding(String),
    /// A stored document could not be deserialized.
    Decoding {
        collection: String,
        key: String,
        message: String,
    },
    /// The backend could not be reached.
    Unavailable(String),
    /// The backend rejected the query.
    InvalidQuery(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Encoding(msg) => write!(f, "document encoding error: {}", msg),
            StoreError::Decoding {
                collection,
                key,
                message,
            } => write!(
                f,
                "document decoding error on {}/{}: {}",
                collection, key, message
            ),
            StoreError::Unavailable(msg) => write!(f, "document store unavailable: {}", msg),
            StoreError::InvalidQuery(msg) => write!(f, "invalid query: {}", msg),
            StoreError::Storage(msg) => write!(f, "document storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub use collection::{Collection, CollectionsExt};
pub use document_store::DocumentStore;
pub use in_memory::InMemoryDocumentStore;
pub use query::{Filter, OrderBy, Query};
