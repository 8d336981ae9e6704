//! Content module - reads posts and builds the listing

mod frontmatter;
pub mod listing;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use listing::get_sorted_posts_data;
pub use loader::PostStore;
pub use markdown::MarkdownRenderer;
pub use post::{PostRecord, PostSummary};
