//! Markdown parsing into an intermediate block/inline tree.
//!
//! pulldown-cmark hands us a flat event stream; the builder here folds it
//! into [`MdNode`] values using a frame stack, one frame per open container.
//! The projection step consumes this tree kind by kind, which is what makes
//! per-kind overrides possible.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

/// One node of the intermediate Markdown tree.
///
/// This is a closed set: the parser runs with core CommonMark options only,
/// so extension constructs (tables, footnotes, strikethrough) never occur.
#[derive(Debug, Clone, PartialEq)]
pub enum MdNode {
    Paragraph { children: Vec<MdNode> },
    Heading { level: u8, children: Vec<MdNode> },
    BlockQuote { children: Vec<MdNode> },
    CodeBlock { language: Option<String>, code: String },
    List { start: Option<u64>, children: Vec<MdNode> },
    Item { children: Vec<MdNode> },
    Emphasis { children: Vec<MdNode> },
    Strong { children: Vec<MdNode> },
    Link { href: String, title: Option<String>, children: Vec<MdNode> },
    Image { src: String, title: Option<String>, alt: String },
    InlineCode(String),
    Text(String),
    SoftBreak,
    HardBreak,
    Rule,
    HtmlBlock(String),
    InlineHtml(String),
}

/// Kind discriminant used as the override-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MdNodeKind {
    Paragraph,
    Heading,
    BlockQuote,
    CodeBlock,
    List,
    Item,
    Emphasis,
    Strong,
    Link,
    Image,
    InlineCode,
    Text,
    SoftBreak,
    HardBreak,
    Rule,
    HtmlBlock,
    InlineHtml,
}

impl MdNode {
    pub fn kind(&self) -> MdNodeKind {
        match self {
            MdNode::Paragraph { .. } => MdNodeKind::Paragraph,
            MdNode::Heading { .. } => MdNodeKind::Heading,
            MdNode::BlockQuote { .. } => MdNodeKind::BlockQuote,
            MdNode::CodeBlock { .. } => MdNodeKind::CodeBlock,
            MdNode::List { .. } => MdNodeKind::List,
            MdNode::Item { .. } => MdNodeKind::Item,
            MdNode::Emphasis { .. } => MdNodeKind::Emphasis,
            MdNode::Strong { .. } => MdNodeKind::Strong,
            MdNode::Link { .. } => MdNodeKind::Link,
            MdNode::Image { .. } => MdNodeKind::Image,
            MdNode::InlineCode(_) => MdNodeKind::InlineCode,
            MdNode::Text(_) => MdNodeKind::Text,
            MdNode::SoftBreak => MdNodeKind::SoftBreak,
            MdNode::HardBreak => MdNodeKind::HardBreak,
            MdNode::Rule => MdNodeKind::Rule,
            MdNode::HtmlBlock(_) => MdNodeKind::HtmlBlock,
            MdNode::InlineHtml(_) => MdNodeKind::InlineHtml,
        }
    }

    pub fn children(&self) -> &[MdNode] {
        match self {
            MdNode::Paragraph { children }
            | MdNode::Heading { children, .. }
            | MdNode::BlockQuote { children }
            | MdNode::List { children, .. }
            | MdNode::Item { children }
            | MdNode::Emphasis { children }
            | MdNode::Strong { children }
            | MdNode::Link { children, .. } => children,
            _ => &[],
        }
    }
}

/// Concatenate the plain text under `nodes`, in document order.
///
/// Markup is ignored, line breaks flatten to single spaces. Used for heading
/// slugs and image alt text, where only the words matter.
pub fn flatten_text(nodes: &[MdNode]) -> String {
    let mut out = String::new();
    collect_flat_text(nodes, &mut out);
    out
}

fn collect_flat_text(nodes: &[MdNode], out: &mut String) {
    for node in nodes {
        match node {
            MdNode::Text(text) => out.push_str(text),
            MdNode::InlineCode(code) => out.push_str(code),
            MdNode::SoftBreak | MdNode::HardBreak => out.push(' '),
            other => collect_flat_text(other.children(), out),
        }
    }
}

/// Parse Markdown source into a list of top-level block nodes.
///
/// Core CommonMark only; the upstream parser is trusted for syntax, this
/// layer only reshapes its events into a tree.
pub fn parse_markdown(source: &str) -> Vec<MdNode> {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(source, Options::empty()) {
        builder.handle_event(event);
    }
    builder.finish()
}

/// An open container awaiting its end event.
enum Pending {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock { language: Option<String> },
    List(Option<u64>),
    Item,
    Emphasis,
    Strong,
    Link { href: String, title: Option<String> },
    Image { src: String, title: Option<String> },
    HtmlBlock,
    // Constructs outside the core set; children pass through transparently.
    Other,
}

struct Frame {
    pending: Pending,
    children: Vec<MdNode>,
}

struct TreeBuilder {
    stack: Vec<Frame>,
    root: Vec<MdNode>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: Vec::new(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(_) => self.end_tag(),
            Event::Text(text) => self.push(MdNode::Text(text.into_string())),
            Event::Code(code) => self.push(MdNode::InlineCode(code.into_string())),
            Event::Html(html) => self.push_html_chunk(html.as_ref()),
            Event::InlineHtml(html) => self.push(MdNode::InlineHtml(html.into_string())),
            Event::SoftBreak => self.push(MdNode::SoftBreak),
            Event::HardBreak => self.push(MdNode::HardBreak),
            Event::Rule => self.push(MdNode::Rule),
            // Extension events; unreachable with core options.
            Event::FootnoteReference(_)
            | Event::TaskListMarker(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        let pending = match tag {
            Tag::Paragraph => Pending::Paragraph,
            Tag::Heading { level, .. } => Pending::Heading(heading_level(level)),
            Tag::BlockQuote(_) => Pending::BlockQuote,
            Tag::CodeBlock(kind) => Pending::CodeBlock {
                language: code_block_language(&kind),
            },
            Tag::List(start) => Pending::List(start),
            Tag::Item => Pending::Item,
            Tag::Emphasis => Pending::Emphasis,
            Tag::Strong => Pending::Strong,
            Tag::Link {
                dest_url, title, ..
            } => Pending::Link {
                href: dest_url.into_string(),
                title: non_empty(title.into_string()),
            },
            Tag::Image {
                dest_url, title, ..
            } => Pending::Image {
                src: dest_url.into_string(),
                title: non_empty(title.into_string()),
            },
            Tag::HtmlBlock => Pending::HtmlBlock,
            _ => Pending::Other,
        };
        self.stack.push(Frame {
            pending,
            children: Vec::new(),
        });
    }

    // Events are balanced, so the popped frame is always the matching one.
    fn end_tag(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let children = frame.children;
        let node = match frame.pending {
            Pending::Paragraph => MdNode::Paragraph { children },
            Pending::Heading(level) => MdNode::Heading { level, children },
            Pending::BlockQuote => MdNode::BlockQuote { children },
            Pending::CodeBlock { language } => MdNode::CodeBlock {
                language,
                code: concat_text(children),
            },
            Pending::List(start) => MdNode::List { start, children },
            Pending::Item => MdNode::Item { children },
            Pending::Emphasis => MdNode::Emphasis { children },
            Pending::Strong => MdNode::Strong { children },
            Pending::Link { href, title } => MdNode::Link {
                href,
                title,
                children,
            },
            Pending::Image { src, title } => MdNode::Image {
                src,
                title,
                alt: flatten_text(&children),
            },
            Pending::HtmlBlock => MdNode::HtmlBlock(concat_text(children)),
            Pending::Other => {
                for child in children {
                    self.push(child);
                }
                return;
            }
        };
        self.push(node);
    }

    fn push(&mut self, node: MdNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    // Raw chunks belong to the enclosing HTML block when one is open.
    fn push_html_chunk(&mut self, html: &str) {
        match self.stack.last_mut() {
            Some(frame) if matches!(frame.pending, Pending::HtmlBlock) => {
                frame.children.push(MdNode::Text(html.to_string()));
            }
            _ => self.push(MdNode::HtmlBlock(html.to_string())),
        }
    }

    fn finish(mut self) -> Vec<MdNode> {
        while !self.stack.is_empty() {
            self.end_tag();
        }
        self.root
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// First word of the fence info string, `None` for indented or bare fences.
fn code_block_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Indented => None,
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .map(|language| language.to_string()),
    }
}

fn concat_text(children: Vec<MdNode>) -> String {
    let mut out = String::new();
    for child in children {
        if let MdNode::Text(text) = child {
            out.push_str(&text);
        }
    }
    out
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
