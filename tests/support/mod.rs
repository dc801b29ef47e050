//! Shared fixtures for the integration suites.

#![allow(dead_code)]

mod instrumented_store;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use postboard::{InMemoryDocumentStore, Post, RemotePostsRepository, User};

pub use instrumented_store::InstrumentedStore;

pub fn jamie() -> User {
    User::new("user-jamie", "Jamie Harris")
}

pub fn alex() -> User {
    User::new("user-alex", "Alex Chen")
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 13, 9, 0, 0).unwrap()
}

/// A post by `author`, `minutes` after the base time.
pub fn post_at(title: &str, author: &User, minutes: i64) -> Post {
    Post::new(title, format!("{} body", title), author.clone())
        .with_timestamp(base_time() + Duration::minutes(minutes))
}

pub fn repository_for(
    store: &Arc<InMemoryDocumentStore>,
    user: User,
) -> RemotePostsRepository<InMemoryDocumentStore> {
    RemotePostsRepository::new(Arc::clone(store), user)
}

pub fn ids(posts: &[Post]) -> Vec<uuid::Uuid> {
    posts.iter().map(|post| post.id).collect()
}

pub fn assert_newest_first(posts: &[Post]) {
    for pair in posts.windows(2) {
        assert!(
            pair[0].timestamp >= pair[1].timestamp,
            "{} is older than {}",
            pair[0].title,
            pair[1].title
        );
    }
}
