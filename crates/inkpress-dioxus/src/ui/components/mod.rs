pub mod layout;
pub mod markup;
pub mod post_index;

pub use layout::Layout;
pub use markup::Markup;
pub use post_index::PostIndex;
