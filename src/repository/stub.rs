use async_trait::async_trait;

use super::repository::PostsRepository;
use crate::error::RepositoryError;
use crate::load_state::LoadState;
use crate::model::{Post, User};

/// Repository answering every fetch with a fixed load state.
///
/// Writes always succeed and change nothing. Useful for previews and for
/// exercising view models without a store.
pub struct StaticPostsRepository {
    user: User,
    state: LoadState<Vec<Post>>,
}

impl StaticPostsRepository {
    pub fn new(user: User, state: LoadState<Vec<Post>>) -> Self {
        Self { user, state }
    }

    fn resolve(&self) -> Result<Vec<Post>, RepositoryError> {
        self.state.clone().into_result()
    }
}

#[async_trait]
impl PostsRepository for StaticPostsRepository {
    fn user(&self) -> &User {
        &self.user
    }

    async fn fetch_all_posts(&self) -> Result<Vec<Post>, RepositoryError> {
        self.resolve()
    }

    async fn fetch_favorite_posts(&self) -> Result<Vec<Post>, RepositoryError> {
        self.resolve()
    }

    async fn fetch_posts_by(&self, _author: &User) -> Result<Vec<Post>, RepositoryError> {
        self.resolve()
    }

    async fn create(&self, _post: &Post) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn delete(&self, _post: &Post) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn favorite(&self, _post: &Post) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn unfavorite(&self, _post: &Post) -> Result<(), RepositoryError> {
        Ok(())
    }
}
