use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::model::{Post, User};

/// Posts as seen by one acting user.
///
/// Every fetch returns posts newest first, each annotated with whether the
/// acting user has favorited it.
#[async_trait]
pub trait PostsRepository: Send + Sync {
    /// The acting user all operations are performed as.
    fn user(&self) -> &User;

    /// All posts.
    async fn fetch_all_posts(&self) -> Result<Vec<Post>, RepositoryError>;

    /// Only the posts the acting user has favorited.
    async fn fetch_favorite_posts(&self) -> Result<Vec<Post>, RepositoryError>;

    /// Posts written by `author`.
    async fn fetch_posts_by(&self, author: &User) -> Result<Vec<Post>, RepositoryError>;

    /// Store a new post. Its favorite flag is not part of what gets stored.
    async fn create(&self, post: &Post) -> Result<(), RepositoryError>;

    /// Remove a post. Only its author may do so.
    async fn delete(&self, post: &Post) -> Result<(), RepositoryError>;

    /// Record that the acting user favorites `post`. Idempotent.
    async fn favorite(&self, post: &Post) -> Result<(), RepositoryError>;

    /// Drop the acting user's favorite of `post`. No-op when absent.
    async fn unfavorite(&self, post: &Post) -> Result<(), RepositoryError>;
}

/// Whether the repository's acting user may delete `post`.
pub fn can_delete<R: PostsRepository + ?Sized>(repository: &R, post: &Post) -> bool {
    post.author.id == repository.user().id
}
