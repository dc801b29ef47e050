//! PostsViewModel - owns the load state of one post list.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{PostDraft, PostRowViewModel, PostsFilter};
use crate::error::RepositoryError;
use crate::load_state::LoadState;
use crate::model::{Post, User};
use crate::repository::PostsRepository;

/// Drives a `LoadState<Vec<Post>>` for one filter.
///
/// Clones are handles to the same list, so row view models can patch the
/// list they came from. The list starts out pending. Each fetch is stamped
/// with a generation: a result that arrives after a newer fetch was started
/// is dropped instead of overwriting newer state. Once deactivated, nothing
/// is written to the list any more, though in-flight remote writes still
/// complete.
pub struct PostsViewModel<R: ?Sized> {
    repository: Arc<R>,
    filter: PostsFilter,
    state: Arc<watch::Sender<LoadState<Vec<Post>>>>,
    generation: Arc<AtomicU64>,
    active: Arc<AtomicBool>,
}

impl<R: ?Sized> Clone for PostsViewModel<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            filter: self.filter.clone(),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            active: Arc::clone(&self.active),
        }
    }
}

impl<R: PostsRepository + ?Sized> PostsViewModel<R> {
    pub fn new(repository: Arc<R>, filter: PostsFilter) -> Self {
        let (state, _) = watch::channel(LoadState::Pending);
        Self {
            repository,
            filter,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn filter(&self) -> &PostsFilter {
        &self.filter
    }

    pub fn title(&self) -> String {
        self.filter.title()
    }

    pub fn user(&self) -> &User {
        self.repository.user()
    }

    pub(crate) fn repository(&self) -> &R {
        &self.repository
    }

    /// Snapshot of the current list state.
    pub fn posts(&self) -> LoadState<Vec<Post>> {
        self.state.borrow().clone()
    }

    /// Change feed of the list state.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<Vec<Post>>> {
        self.state.subscribe()
    }

    /// Posts of the ready list matching a search string. An empty search
    /// matches everything; a list that is not ready yields nothing.
    pub fn visible_posts(&self, search: &str) -> Vec<Post> {
        let state = self.state.borrow();
        state
            .ready()
            .map(|posts| {
                posts
                    .iter()
                    .filter(|post| search.is_empty() || post.contains(search))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Detach from the view this list serves. Later results are discarded.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Fetch the list for this filter and store the outcome.
    ///
    /// Returns whether the outcome was applied; it is not when a newer fetch
    /// started meanwhile or the view model was deactivated.
    pub async fn fetch_posts(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.filter.fetch(self.repository.as_ref()).await;

        if let Err(err) = &result {
            warn!(filter = ?self.filter, error = %err, "cannot fetch posts");
        }
        if !self.is_active() {
            debug!(generation, "dropping fetch result for inactive view model");
            return false;
        }

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = LoadState::from_result(result);
            true
        });
        if !applied {
            debug!(generation, "dropping stale fetch result");
        }
        applied
    }

    /// Create `post` and put it at the top of the ready list.
    pub async fn create_post(&self, post: Post) -> Result<(), RepositoryError> {
        self.repository.create(&post).await?;
        self.patch(|posts| posts.insert(0, post));
        Ok(())
    }

    /// Delete `post` and drop it from the ready list.
    pub async fn delete_post(&self, post: &Post) -> Result<(), RepositoryError> {
        self.repository.delete(post).await?;
        self.patch(|posts| posts.retain(|candidate| !candidate.same_post(post)));
        Ok(())
    }

    /// Favorite or unfavorite `post` and update its flag in the ready list.
    pub async fn set_favorite(&self, post: &Post, favorite: bool) -> Result<(), RepositoryError> {
        if favorite {
            self.repository.favorite(post).await?;
        } else {
            self.repository.unfavorite(post).await?;
        }
        self.patch(|posts| {
            if let Some(candidate) = posts.iter_mut().find(|candidate| candidate.same_post(post)) {
                candidate.is_favorite = favorite;
            }
        });
        Ok(())
    }

    /// Flip the favorite state of `post`, returning the new state.
    pub async fn toggle_favorite(&self, post: &Post) -> Result<bool, RepositoryError> {
        let favorite = !post.is_favorite;
        self.set_favorite(post, favorite).await?;
        Ok(favorite)
    }

    pub fn make_post_row(&self, post: Post) -> PostRowViewModel<R> {
        PostRowViewModel::new(post, self.clone())
    }

    pub fn make_draft(&self) -> PostDraft {
        PostDraft::new(self.user().clone())
    }

    fn patch<F>(&self, edit: F)
    where
        F: FnOnce(&mut Vec<Post>),
    {
        if !self.is_active() {
            return;
        }
        self.state.send_if_modified(|state| state.update_ready(edit));
    }
}
