use std::collections::BTreeMap;

/// Generic tagged-element tree produced by the rendering pipeline.
///
/// This is the output artifact of the engine: every renderer and the code
/// highlighter emit `MarkupNode` trees, and the UI layer projects them into
/// its own element type. The shape is deliberately grammar-agnostic so the
/// tree-walking code in the highlighter is written once, not once per
/// language.
///
/// - **`Element`**: a tag name, a string-keyed attribute map, and ordered
///   children. Attributes use a `BTreeMap` so iteration order (and therefore
///   serialized output) is deterministic.
/// - **`Text`**: a plain text leaf. Text is stored unescaped; escaping is the
///   host framework's concern at serialization time.
/// - **`Raw`**: a raw HTML leaf. Only produced when raw passthrough is
///   explicitly enabled in the render options, never by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        children: Vec<MarkupNode>,
    },
    Text(String),
    Raw(String),
}

impl MarkupNode {
    /// Create an empty element with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        MarkupNode::Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text(text.into())
    }

    /// Builder-style attribute setter. No-op on text and raw leaves.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let MarkupNode::Element { ref mut attrs, .. } = self {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    /// Builder-style child list setter. No-op on text and raw leaves.
    pub fn with_children(mut self, nodes: Vec<MarkupNode>) -> Self {
        if let MarkupNode::Element {
            ref mut children, ..
        } = self
        {
            *children = nodes;
        }
        self
    }

    /// Append a child to an element. No-op on text and raw leaves.
    pub fn push(&mut self, node: MarkupNode) {
        if let MarkupNode::Element { children, .. } = self {
            children.push(node);
        }
    }

    /// The element's tag name, or `None` for leaves.
    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Look up an attribute value on an element.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// The element's children, empty for leaves.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content of all text leaves, in document order.
    ///
    /// For highlighted code this reproduces the input source exactly; raw
    /// HTML leaves are not text and contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            MarkupNode::Raw(_) => {}
        }
    }
}
