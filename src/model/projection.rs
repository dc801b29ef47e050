use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Post, User};

/// Read-only view of the post fields a presentation layer renders.
pub trait PostProjection {
    fn id(&self) -> Uuid;
    fn title(&self) -> &str;
    fn content(&self) -> &str;
    fn author(&self) -> &User;
    fn timestamp(&self) -> DateTime<Utc>;
    fn is_favorite(&self) -> bool;
}

impl PostProjection for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn author(&self) -> &User {
        &self.author
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }
}
