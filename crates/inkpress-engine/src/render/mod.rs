//! Markdown to markup tree rendering.
//!
//! Rendering runs in two stages. [`ast`] parses the source into an
//! intermediate tree of [`MdNode`] values, then [`project`] walks that tree
//! top-down and emits [`MarkupNode`] markup, consulting a per-kind override
//! table before falling back to the default projection. Sibling order is
//! preserved throughout; nothing is reordered.
//!
//! The renderer is constructed once with its grammar registry and can then
//! render any number of documents, concurrently if desired. All per-document
//! state (the anchor slugger) is created fresh inside [`Renderer::render`].

pub mod ast;
mod project;

pub use ast::{MdNode, MdNodeKind, flatten_text, parse_markdown};
pub use project::{OverrideFn, Overrides, ProjectCx};

use crate::highlight::GrammarRegistry;
use crate::markup::MarkupNode;

/// Document-independent rendering policy.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Pass literal HTML through as raw markup instead of escaping it.
    pub allow_raw_html: bool,
    /// Drop a leading level-1 heading from the body. The first line doubles
    /// as the document title, and some layouts render the title themselves.
    pub strip_title_heading: bool,
}

/// Markdown renderer with an injected grammar registry.
pub struct Renderer<'r> {
    registry: &'r GrammarRegistry,
    options: RenderOptions,
    overrides: Overrides,
}

impl<'r> Renderer<'r> {
    /// A renderer with the stock override table and default options.
    pub fn new(registry: &'r GrammarRegistry) -> Self {
        Self {
            registry,
            options: RenderOptions::default(),
            overrides: Overrides::standard(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Render one document into an `article` markup tree.
    pub fn render(&self, source: &str) -> MarkupNode {
        let blocks = ast::parse_markdown(source);
        let mut cx = ProjectCx::new(self.registry, &self.options, &self.overrides);

        let mut skip_title = self.options.strip_title_heading
            && matches!(blocks.first(), Some(MdNode::Heading { level: 1, .. }));

        let mut children = Vec::with_capacity(blocks.len());
        for block in &blocks {
            if skip_title {
                skip_title = false;
                continue;
            }
            children.push(cx.project(block));
        }
        MarkupNode::element("article").with_children(children)
    }
}
