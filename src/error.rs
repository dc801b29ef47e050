use std::fmt;

use crate::store::StoreError;

/// Errors surfaced by posts repository operations.
///
/// Deleting or unfavoriting something that is already absent is not an
/// error; those calls succeed as no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A document could not be serialized. This is a programming error in
    /// the entity definition and should not be retried.
    Encoding(String),
    /// A stored document could not be read back as the expected entity.
    Decoding {
        collection: String,
        key: String,
        message: String,
    },
    /// Network or backend failure. Recoverable by re-invoking the operation.
    Remote(String),
    /// The acting user is not allowed to perform the operation on the post.
    Authorization { post_id: String, user_id: String },
}

impl RepositoryError {
    /// Whether re-invoking the same operation might succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RepositoryError::Remote(_))
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Encoding(message) => write!(f, "encoding error: {}", message),
            RepositoryError::Decoding {
                collection,
                key,
                message,
            } => write!(
                f,
                "could not decode document {}/{}: {}",
                collection, key, message
            ),
            RepositoryError::Remote(message) => write!(f, "remote error: {}", message),
            RepositoryError::Authorization { post_id, user_id } => write!(
                f,
                "user {} is not allowed to delete post {}",
                user_id, post_id
            ),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Encoding(message) => RepositoryError::Encoding(message),
            StoreError::Decoding {
                collection,
                key,
                message,
            } => RepositoryError::Decoding {
                collection,
                key,
                message,
            },
            other => RepositoryError::Remote(other.to_string()),
        }
    }
}
