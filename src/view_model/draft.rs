use std::fmt;

use super::PostsViewModel;
use crate::error::RepositoryError;
use crate::model::{Post, User};
use crate::repository::PostsRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The title is empty once surrounding whitespace is removed.
    EmptyTitle,
    Repository(RepositoryError),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::EmptyTitle => write!(f, "a post needs a title"),
            DraftError::Repository(err) => write!(f, "cannot create post: {}", err),
        }
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DraftError::Repository(err) => Some(err),
            DraftError::EmptyTitle => None,
        }
    }
}

impl From<RepositoryError> for DraftError {
    fn from(err: RepositoryError) -> Self {
        DraftError::Repository(err)
    }
}

/// Form state for a new post by the acting user.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    author: User,
}

impl PostDraft {
    pub fn new(author: User) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            author,
        }
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    /// Build the post this draft describes, with a fresh id and timestamp.
    pub fn build(&self) -> Result<Post, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        Ok(Post::new(title, self.content.trim(), self.author.clone()))
    }

    /// Create the post through `list`. The draft is cleared on success and
    /// kept as-is on failure so it can be submitted again.
    pub async fn submit<R: PostsRepository + ?Sized>(
        &mut self,
        list: &PostsViewModel<R>,
    ) -> Result<Post, DraftError> {
        let post = self.build()?;
        list.create_post(post.clone()).await?;
        self.title.clear();
        self.content.clear();
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_trims_and_requires_title() {
        let mut draft = PostDraft::new(User::new("user-1", "Jamie"));
        draft.title = "   ".into();
        assert_eq!(draft.build().unwrap_err(), DraftError::EmptyTitle);

        draft.title = "  Hello ".into();
        draft.content = "\nWorld\n".into();
        let post = draft.build().unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.author.id, "user-1");
        assert!(!post.is_favorite);
    }
}
