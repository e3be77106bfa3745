pub mod page;
pub mod post;

pub use page::Page;
pub use post::Post;
