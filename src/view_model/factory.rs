use std::sync::Arc;

use super::{PostsFilter, PostsViewModel};
use crate::config::RepositoryConfig;
use crate::identity::IdentityProvider;
use crate::model::User;
use crate::repository::RemotePostsRepository;
use crate::store::DocumentStore;

/// Builds view models wired to one store, acting as one user.
pub struct ViewModelFactory<S: ?Sized> {
    store: Arc<S>,
    user: User,
    config: RepositoryConfig,
}

impl<S: DocumentStore + ?Sized> ViewModelFactory<S> {
    pub fn new(store: Arc<S>, user: User) -> Self {
        Self::with_config(store, user, RepositoryConfig::default())
    }

    pub fn with_config(store: Arc<S>, user: User, config: RepositoryConfig) -> Self {
        Self {
            store,
            user,
            config,
        }
    }

    /// A factory for whoever is signed in, or `None` when nobody is.
    pub fn from_identity(store: Arc<S>, identity: &dyn IdentityProvider) -> Option<Self> {
        identity.current_user().map(|user| Self::new(store, user))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn make_repository(&self) -> RemotePostsRepository<S> {
        RemotePostsRepository::with_config(
            Arc::clone(&self.store),
            self.user.clone(),
            self.config.clone(),
        )
    }

    pub fn make_posts_view_model(
        &self,
        filter: PostsFilter,
    ) -> PostsViewModel<RemotePostsRepository<S>> {
        PostsViewModel::new(Arc::new(self.make_repository()), filter)
    }
}
