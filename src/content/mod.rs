//! Content module - handles posts and content processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::{LoadError, PostLoader};
pub use markdown::MarkdownRenderer;
pub use post::Post;
