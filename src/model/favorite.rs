use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

/// Marks that a user has favorited a post.
///
/// The storage key is derived from both ids, so there is at most one
/// relation per (post, user) pair and writing it twice is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteRelation {
    #[serde(rename = "postID")]
    pub post_id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: String,
}

impl FavoriteRelation {
    pub fn new(post_id: Uuid, user_id: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id: user_id.into(),
        }
    }
}

impl Document for FavoriteRelation {
    fn key(&self) -> String {
        format!("{}-{}", self.post_id, self.user_id)
    }
}
