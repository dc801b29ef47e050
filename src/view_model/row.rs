use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use super::PostsViewModel;
use crate::error::RepositoryError;
use crate::model::{Post, PostProjection, User};
use crate::repository::{can_delete, PostsRepository};

/// One row of a post list, with the actions a reader can take on it.
///
/// Action failures are kept in a transient error slot instead of replacing
/// the list state; [`take_error`](Self::take_error) reads and clears it.
pub struct PostRowViewModel<R: ?Sized> {
    post: Post,
    can_delete: bool,
    error: Option<RepositoryError>,
    list: PostsViewModel<R>,
}

impl<R: PostsRepository + ?Sized> PostRowViewModel<R> {
    pub(crate) fn new(post: Post, list: PostsViewModel<R>) -> Self {
        let can_delete = can_delete(list.repository(), &post);
        Self {
            post,
            can_delete,
            error: None,
            list,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn can_delete_post(&self) -> bool {
        self.can_delete
    }

    pub fn error(&self) -> Option<&RepositoryError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<RepositoryError> {
        self.error.take()
    }

    /// Delete the post. Returns whether it was deleted.
    pub async fn delete_post(&mut self) -> bool {
        match self.list.delete_post(&self.post).await {
            Ok(()) => true,
            Err(err) => {
                warn!(post_id = %self.post.id, error = %err, "cannot delete post");
                self.error = Some(err);
                false
            }
        }
    }

    /// Flip the favorite state. Returns whether the change went through.
    pub async fn toggle_favorite(&mut self) -> bool {
        match self.list.toggle_favorite(&self.post).await {
            Ok(favorite) => {
                self.post.is_favorite = favorite;
                true
            }
            Err(err) => {
                warn!(post_id = %self.post.id, error = %err, "cannot change favorite");
                self.error = Some(err);
                false
            }
        }
    }
}

impl<R: ?Sized> PostProjection for PostRowViewModel<R> {
    fn id(&self) -> Uuid {
        self.post.id
    }

    fn title(&self) -> &str {
        &self.post.title
    }

    fn content(&self) -> &str {
        &self.post.content
    }

    fn author(&self) -> &User {
        &self.post.author
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.post.timestamp
    }

    fn is_favorite(&self) -> bool {
        self.post.is_favorite
    }
}
