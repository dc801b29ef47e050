//! View models - keep a consumer-owned `LoadState` in sync with the
//! repository and with writes issued through it.
//!
//! Fetches replace the whole list. Successful writes patch the ready list
//! in place right away, ahead of any re-fetch; failed writes leave it alone
//! and hand the error back to the caller.
//!
//! ## Example
//!
//! ```ignore
//! use postboard::{InMemoryDocumentStore, PostsFilter, User, ViewModelFactory};
//!
//! let factory = ViewModelFactory::new(Arc::new(InMemoryDocumentStore::new()), user);
//! let feed = factory.make_posts_view_model(PostsFilter::All);
//! feed.fetch_posts().await;
//!
//! let mut draft = feed.make_draft();
//! draft.title = "Hello".into();
//! draft.submit(&feed).await?;
//! assert_eq!(feed.posts().ready().unwrap()[0].title, "Hello");
//! ```

mod draft;
mod factory;
mod filter;
mod posts;
mod row;

pub use draft::{DraftError, PostDraft};
pub use factory::ViewModelFactory;
pub use filter::PostsFilter;
pub use posts::PostsViewModel;
pub use row::PostRowViewModel;
