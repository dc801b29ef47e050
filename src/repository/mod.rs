mod remote;
mod repository;
mod stub;

pub use remote::RemotePostsRepository;
pub use repository::{can_delete, PostsRepository};
pub use stub::StaticPostsRepository;
