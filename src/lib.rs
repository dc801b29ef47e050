mod config;
mod error;
mod identity;
mod load_state;
mod model;
mod repository;
mod store;
mod view_model;

pub use config::RepositoryConfig;
pub use error::RepositoryError;
pub use identity::{IdentityProvider, Session};
pub use load_state::LoadState;
pub use model::{FavoriteRelation, Post, PostProjection, User};
pub use repository::{can_delete, PostsRepository, RemotePostsRepository, StaticPostsRepository};
pub use store::{
    Collection, CollectionsExt, Document, DocumentStore, Filter, InMemoryDocumentStore, OrderBy,
    Query, StoreError,
};
pub use view_model::{
    DraftError, PostDraft, PostRowViewModel, PostsFilter, PostsViewModel, ViewModelFactory,
};
