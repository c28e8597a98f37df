//! Content module - posts, front-matter and markdown processing

mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod slug;
pub mod store;

pub use error::{ContentError, Result};
pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, MORE_MARKER};
pub use post::{sort_by_date_desc, Post, PostMeta};
pub use store::{ContentStore, Scan};
