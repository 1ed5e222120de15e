//! Content module - the post record store and its parsing

mod frontmatter;
pub mod loader;
mod post;
mod store;
pub mod validate;

pub use frontmatter::{FrontMatter, MetadataError};
pub use post::{Category, Post, Tag};
pub use store::PostStore;
