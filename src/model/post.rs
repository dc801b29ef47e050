use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;
use crate::store::Document;

/// A post in the shared feed.
///
/// `is_favorite` is relative to whoever fetched the post. It is skipped by
/// serde in both directions, so it never reaches the post document and any
/// legacy favorite field found in stored documents is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: User,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub is_favorite: bool,
}

impl Post {
    /// A new post by `author`, with a fresh id and the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: User) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            author,
            timestamp: Utc::now(),
            is_favorite: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Identity comparison used for in-place list updates.
    pub fn same_post(&self, other: &Post) -> bool {
        self.id == other.id
    }

    /// Case-insensitive substring match over title, content and author name.
    pub fn contains(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.title, &self.content, &self.author.name]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    pub(crate) fn annotated(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

impl Document for Post {
    fn key(&self) -> String {
        self.id.to_string()
    }
}
