use std::collections::HashMap;

use crate::highlight::{self, GrammarRegistry};
use crate::markup::MarkupNode;
use crate::render::RenderOptions;
use crate::render::ast::{MdNode, MdNodeKind, flatten_text};
use crate::slug::Slugger;

/// An override projects one Markdown node kind to markup, or returns `None`
/// to fall through to the default projection for that node.
pub type OverrideFn = Box<dyn Fn(&MdNode, &mut ProjectCx) -> Option<MarkupNode> + Send + Sync>;

/// Per-kind projection overrides.
///
/// The stock table installs the three behaviors that make this a blog
/// renderer rather than a plain Markdown converter: code blocks get
/// tree-sitter highlighting, images get a 2x srcset, headings get anchor
/// slugs with self-links. Callers can replace or extend the table; kinds
/// with no entry use the default projection.
pub struct Overrides {
    table: HashMap<MdNodeKind, OverrideFn>,
}

impl Overrides {
    /// An empty table: every node kind uses the default projection.
    pub fn none() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// The stock table: highlighted code blocks, responsive images, anchored
    /// headings.
    pub fn standard() -> Self {
        let mut overrides = Self::none();
        overrides.set(MdNodeKind::CodeBlock, project_code_block);
        overrides.set(MdNodeKind::Image, project_image);
        overrides.set(MdNodeKind::Heading, project_heading);
        overrides
    }

    /// Install an override for one node kind, replacing any previous one.
    pub fn set<F>(&mut self, kind: MdNodeKind, project: F)
    where
        F: Fn(&MdNode, &mut ProjectCx) -> Option<MarkupNode> + Send + Sync + 'static,
    {
        self.table.insert(kind, Box::new(project));
    }

    pub fn get(&self, kind: MdNodeKind) -> Option<&OverrideFn> {
        self.table.get(&kind)
    }
}

impl Default for Overrides {
    fn default() -> Self {
        Self::standard()
    }
}

/// State for one document's projection pass.
///
/// Holds the injected registry and options plus the per-document slugger,
/// which is why one `ProjectCx` must never span two documents.
pub struct ProjectCx<'a> {
    registry: &'a GrammarRegistry,
    options: &'a RenderOptions,
    overrides: &'a Overrides,
    slugger: Slugger,
}

impl<'a> ProjectCx<'a> {
    pub(crate) fn new(
        registry: &'a GrammarRegistry,
        options: &'a RenderOptions,
        overrides: &'a Overrides,
    ) -> Self {
        Self {
            registry,
            options,
            overrides,
            slugger: Slugger::new(),
        }
    }

    pub fn registry(&self) -> &GrammarRegistry {
        self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Assign the next free anchor slug for this document.
    pub fn assign_slug(&mut self, text: &str) -> String {
        self.slugger.assign(text)
    }

    /// Project one node, consulting the override table first.
    pub fn project(&mut self, node: &MdNode) -> MarkupNode {
        // The table reference outlives `self`, so the override can borrow the
        // context mutably while we hold the function.
        let table = self.overrides;
        if let Some(project_override) = table.get(node.kind()) {
            if let Some(markup) = project_override(node, self) {
                return markup;
            }
        }
        self.project_default(node)
    }

    /// Project a node list in document order.
    pub fn project_children(&mut self, nodes: &[MdNode]) -> Vec<MarkupNode> {
        nodes.iter().map(|node| self.project(node)).collect()
    }

    fn project_default(&mut self, node: &MdNode) -> MarkupNode {
        match node {
            MdNode::Paragraph { children } => {
                MarkupNode::element("p").with_children(self.project_children(children))
            }
            MdNode::Heading { level, children } => MarkupNode::element(heading_tag(*level))
                .with_children(self.project_children(children)),
            MdNode::BlockQuote { children } => {
                MarkupNode::element("blockquote").with_children(self.project_children(children))
            }
            MdNode::CodeBlock { language, code } => {
                let mut code_element = MarkupNode::element("code");
                if let Some(language) = language {
                    code_element = code_element.with_attr("class", format!("language-{language}"));
                }
                let code = code.trim_end_matches('\n');
                if !code.is_empty() {
                    code_element.push(MarkupNode::text(code));
                }
                MarkupNode::element("pre").with_children(vec![code_element])
            }
            MdNode::List { start, children } => {
                let inner = self.project_children(children);
                match start {
                    Some(start) => {
                        let mut list = MarkupNode::element("ol");
                        if *start != 1 {
                            list = list.with_attr("start", start.to_string());
                        }
                        list.with_children(inner)
                    }
                    None => MarkupNode::element("ul").with_children(inner),
                }
            }
            MdNode::Item { children } => {
                MarkupNode::element("li").with_children(self.project_children(children))
            }
            MdNode::Emphasis { children } => {
                MarkupNode::element("em").with_children(self.project_children(children))
            }
            MdNode::Strong { children } => {
                MarkupNode::element("strong").with_children(self.project_children(children))
            }
            MdNode::Link {
                href,
                title,
                children,
            } => {
                let mut link = MarkupNode::element("a").with_attr("href", href.clone());
                if let Some(title) = title {
                    link = link.with_attr("title", title.clone());
                }
                link.with_children(self.project_children(children))
            }
            MdNode::Image { src, title, alt } => {
                let mut img = MarkupNode::element("img")
                    .with_attr("src", src.clone())
                    .with_attr("alt", alt.clone());
                if let Some(title) = title {
                    img = img.with_attr("title", title.clone());
                }
                img
            }
            // Inline code is never parsed; only fenced blocks carry a
            // language tag.
            MdNode::InlineCode(code) => {
                MarkupNode::element("code").with_children(vec![MarkupNode::text(code.clone())])
            }
            MdNode::Text(text) => MarkupNode::text(text.clone()),
            MdNode::SoftBreak => MarkupNode::text("\n"),
            MdNode::HardBreak => MarkupNode::element("br"),
            MdNode::Rule => MarkupNode::element("hr"),
            MdNode::HtmlBlock(html) | MdNode::InlineHtml(html) => {
                if self.options.allow_raw_html {
                    MarkupNode::Raw(html.clone())
                } else {
                    // Escaped by the host at serialization time.
                    MarkupNode::text(html.clone())
                }
            }
        }
    }
}

fn project_code_block(node: &MdNode, cx: &mut ProjectCx) -> Option<MarkupNode> {
    let MdNode::CodeBlock { language, code } = node else {
        return None;
    };
    let tag = language.as_ref().map(|name| format!("language-{name}"));
    let highlighted = highlight::highlight(code, tag.as_deref(), cx.registry());
    Some(MarkupNode::element("pre").with_children(vec![highlighted]))
}

fn project_image(node: &MdNode, _cx: &mut ProjectCx) -> Option<MarkupNode> {
    let MdNode::Image { src, alt, .. } = node else {
        return None;
    };
    // The 2x variant lives at the same path; the density descriptor lets the
    // browser pick it on high-DPI screens.
    Some(
        MarkupNode::element("img")
            .with_attr("src", src.clone())
            .with_attr("srcset", format!("{src} 2x"))
            .with_attr("alt", alt.clone()),
    )
}

fn project_heading(node: &MdNode, cx: &mut ProjectCx) -> Option<MarkupNode> {
    let MdNode::Heading { level, children } = node else {
        return None;
    };
    let slug = cx.assign_slug(&flatten_text(children));
    let inline = cx.project_children(children);
    let anchor = MarkupNode::element("a")
        .with_attr("href", format!("#{slug}"))
        .with_children(inline);
    Some(
        MarkupNode::element(heading_tag(*level))
            .with_attr("id", slug)
            .with_children(vec![anchor]),
    )
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
