use crate::error::RepositoryError;
use crate::model::{Post, User};
use crate::repository::PostsRepository;

/// Which slice of the feed a list shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostsFilter {
    #[default]
    All,
    Author(User),
    Favorites,
}

impl PostsFilter {
    pub fn title(&self) -> String {
        match self {
            PostsFilter::All => "Posts".to_string(),
            PostsFilter::Author(author) => author.name.clone(),
            PostsFilter::Favorites => "Favorites".to_string(),
        }
    }

    pub(crate) async fn fetch<R: PostsRepository + ?Sized>(
        &self,
        repository: &R,
    ) -> Result<Vec<Post>, RepositoryError> {
        match self {
            PostsFilter::All => repository.fetch_all_posts().await,
            PostsFilter::Author(author) => repository.fetch_posts_by(author).await,
            PostsFilter::Favorites => repository.fetch_favorite_posts().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles() {
        assert_eq!(PostsFilter::default(), PostsFilter::All);
        assert_eq!(PostsFilter::All.title(), "Posts");
        assert_eq!(PostsFilter::Favorites.title(), "Favorites");
        assert_eq!(
            PostsFilter::Author(User::new("u", "Jamie Harris")).title(),
            "Jamie Harris"
        );
    }
}
