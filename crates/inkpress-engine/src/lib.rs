pub mod content;
pub mod highlight;
pub mod markup;
pub mod models;
pub mod render;
pub mod slug;


// Re-export key types for easier usage
pub use content::{ContentError, list_pages, list_posts, read_source, read_title};
pub use highlight::{Grammar, GrammarRegistry, highlight};
pub use markup::MarkupNode;
pub use models::{Page, Post};
pub use render::{MdNode, MdNodeKind, Overrides, RenderOptions, Renderer};
pub use slug::{Slugger, slugify};
