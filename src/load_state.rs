//! LoadState - the progress of an asynchronous read as seen by its consumer.

use crate::error::RepositoryError;

/// Exactly one of pending, failed or ready.
///
/// A `LoadState` is owned by a single consumer. Fetches replace it wholesale;
/// optimistic edits mutate the ready payload in place between fetches.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Pending,
    Failed(RepositoryError),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, RepositoryError>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(err) => LoadState::Failed(err),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// The ready payload, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RepositoryError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Replace the ready payload. Does nothing unless the state is ready.
    pub fn set_ready(&mut self, value: T) {
        if let LoadState::Ready(current) = self {
            *current = value;
        }
    }

    /// Mutate the ready payload in place. Returns whether the closure ran.
    pub fn update_ready<F>(&mut self, update: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self {
            LoadState::Ready(value) => {
                update(value);
                true
            }
            _ => false,
        }
    }

    pub fn map<U, F>(self, f: F) -> LoadState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            LoadState::Pending => LoadState::Pending,
            LoadState::Failed(err) => LoadState::Failed(err),
            LoadState::Ready(value) => LoadState::Ready(f(value)),
        }
    }

    /// Resolve the state as if it were the outcome of a fetch. A pending
    /// state has no outcome yet and reports a remote error.
    pub fn into_result(self) -> Result<T, RepositoryError> {
        match self {
            LoadState::Ready(value) => Ok(value),
            LoadState::Failed(err) => Err(err),
            LoadState::Pending => Err(RepositoryError::Remote("still loading".into())),
        }
    }
}

impl<T: Default> LoadState<T> {
    /// Ready with an empty payload.
    pub fn empty() -> Self {
        LoadState::Ready(T::default())
    }
}

impl<T> LoadState<Vec<T>> {
    /// Ready, but with nothing in it.
    pub fn is_empty_ready(&self) -> bool {
        self.ready().map_or(false, Vec::is_empty)
    }
}
