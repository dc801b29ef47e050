//! Models - the entities exchanged with the document store.
//!
//! `Post` and `FavoriteRelation` live in separate collections. A post's
//! favorite flag is never stored with the post: it is resolved per reader
//! from that reader's relations when posts are fetched.

mod favorite;
mod post;
mod projection;
mod user;

pub use favorite::FavoriteRelation;
pub use post::Post;
pub use projection::PostProjection;
pub use user::User;
