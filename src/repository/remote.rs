//! RemotePostsRepository - merges the posts and favorite relation collections.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::repository::{can_delete, PostsRepository};
use crate::config::RepositoryConfig;
use crate::error::RepositoryError;
use crate::model::{FavoriteRelation, Post, User};
use crate::store::{Collection, CollectionsExt, Document, DocumentStore, Query};

/// Posts repository backed by a remote document store.
///
/// Favorite state is kept out of the shared post documents. Each fetch runs
/// the post query and the acting user's favorites query concurrently and
/// stamps every returned post with the resolved flag.
pub struct RemotePostsRepository<S: ?Sized> {
    store: Arc<S>,
    user: User,
    config: RepositoryConfig,
}

impl<S: DocumentStore + ?Sized> RemotePostsRepository<S> {
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

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn posts(&self) -> Collection<'_, S, Post> {
        self.store.collection(&self.config.posts_collection)
    }

    fn favorites(&self) -> Collection<'_, S, FavoriteRelation> {
        self.store.collection(&self.config.favorites_collection)
    }

    fn relation_for(&self, post: &Post) -> FavoriteRelation {
        FavoriteRelation::new(post.id, self.user.id.clone())
    }

    /// Ids of every post the acting user has favorited. Relations whose post
    /// has since been deleted are included; they simply never match.
    async fn favorite_post_ids(&self) -> Result<HashSet<Uuid>, RepositoryError> {
        let favorites = self.favorites();
        let query = favorites.query().where_eq("userID", self.user.id.as_str());
        let relations = favorites.get(&query).await?;
        Ok(relations.into_iter().map(|relation| relation.post_id).collect())
    }

    /// Run `query` newest first alongside the favorites query, then merge.
    async fn fetch_annotated(&self, query: Query) -> Result<Vec<Post>, RepositoryError> {
        let query = query.order_by("timestamp", true);
        let posts = self.posts();

        let (posts, favorite_ids) = tokio::try_join!(
            async { posts.get(&query).await.map_err(RepositoryError::from) },
            self.favorite_post_ids(),
        )?;

        debug!(
            user_id = %self.user.id,
            posts = posts.len(),
            favorites = favorite_ids.len(),
            "merged posts with favorites"
        );

        Ok(posts
            .into_iter()
            .map(|post| {
                let is_favorite = favorite_ids.contains(&post.id);
                post.annotated(is_favorite)
            })
            .collect())
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> PostsRepository for RemotePostsRepository<S> {
    fn user(&self) -> &User {
        &self.user
    }

    async fn fetch_all_posts(&self) -> Result<Vec<Post>, RepositoryError> {
        self.fetch_annotated(self.posts().query()).await
    }

    async fn fetch_favorite_posts(&self) -> Result<Vec<Post>, RepositoryError> {
        let favorite_ids = self.favorite_post_ids().await?;
        if favorite_ids.is_empty() {
            debug!(user_id = %self.user.id, "no favorites, skipping posts query");
            return Ok(Vec::new());
        }

        let posts = self.posts();
        let query = posts
            .query()
            .where_in("id", favorite_ids.iter().map(Uuid::to_string))
            .order_by("timestamp", true);
        let favorites = posts.get(&query).await?;

        debug!(
            user_id = %self.user.id,
            relations = favorite_ids.len(),
            posts = favorites.len(),
            "resolved favorite posts"
        );
        Ok(favorites
            .into_iter()
            .map(|post| post.annotated(true))
            .collect())
    }

    async fn fetch_posts_by(&self, author: &User) -> Result<Vec<Post>, RepositoryError> {
        let query = self.posts().query().where_eq("author.id", author.id.as_str());
        self.fetch_annotated(query).await
    }

    async fn create(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts().set(post).await?;
        info!(post_id = %post.id, author_id = %post.author.id, "created post");
        Ok(())
    }

    async fn delete(&self, post: &Post) -> Result<(), RepositoryError> {
        if !can_delete(self, post) {
            warn!(
                post_id = %post.id,
                user_id = %self.user.id,
                "rejected delete by non-author"
            );
            return Err(RepositoryError::Authorization {
                post_id: post.id.to_string(),
                user_id: self.user.id.clone(),
            });
        }

        // Other users' relations to this post are left behind on purpose.
        self.posts().delete(&post.key()).await?;
        info!(post_id = %post.id, "deleted post");
        Ok(())
    }

    async fn favorite(&self, post: &Post) -> Result<(), RepositoryError> {
        self.favorites().set(&self.relation_for(post)).await?;
        info!(post_id = %post.id, user_id = %self.user.id, "favorited post");
        Ok(())
    }

    async fn unfavorite(&self, post: &Post) -> Result<(), RepositoryError> {
        self.favorites()
            .delete(&self.relation_for(post).key())
            .await?;
        info!(post_id = %post.id, user_id = %self.user.id, "unfavorited post");
        Ok(())
    }
}
