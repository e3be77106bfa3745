//! Syntax highlighting for fenced code blocks.
//!
//! Code is parsed with tree-sitter into a concrete syntax tree, then the CST
//! is lowered to a [`MarkupNode`] span tree. The lowering walks every child
//! of every node and fills the byte gaps between them with plain text, so the
//! concatenated text of the output always reproduces the input exactly, even
//! for source the grammar cannot fully parse. Parse errors surface as
//! `tok-error` spans, never as render failures.
//!
//! Unknown language tags and parser construction failures degrade to a plain
//! `<code>` element carrying the original tag as its class.

mod registry;

pub use registry::{Grammar, GrammarRegistry};

use std::ops::Range;

use tree_sitter::{Node, Parser, Tree};

use crate::markup::MarkupNode;

/// Highlight a fenced code block into a markup tree.
///
/// Trailing newlines are stripped first; fence contents always carry at
/// least one and rendering it would add phantom blank lines inside `<pre>`.
/// The result is a `code` element whose `class` is the language tag (when
/// one was given) and whose children are highlight spans and text.
pub fn highlight(
    source: &str,
    language_tag: Option<&str>,
    registry: &GrammarRegistry,
) -> MarkupNode {
    let code = source.trim_end_matches('\n');

    let Some(tag) = language_tag else {
        return plain_code(code, None);
    };
    let Some(grammar) = registry.resolve(tag) else {
        return plain_code(code, Some(tag));
    };
    match parse_code(code, grammar) {
        Some(tree) => spans_from_tree(&tree, code, tag),
        None => plain_code(code, Some(tag)),
    }
}

/// Unhighlighted rendering: the same `code` element shape with a single text
/// child, used whenever no grammar applies.
fn plain_code(code: &str, language_tag: Option<&str>) -> MarkupNode {
    let mut element = MarkupNode::element("code");
    if let Some(tag) = language_tag {
        element = element.with_attr("class", tag);
    }
    if !code.is_empty() {
        element.push(MarkupNode::text(code));
    }
    element
}

fn parse_code(code: &str, grammar: &Grammar) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(grammar.language()).ok()?;
    parser.parse(code, None)
}

fn spans_from_tree(tree: &Tree, code: &str, tag: &str) -> MarkupNode {
    let mut children = Vec::new();
    // The root wrapper is the `code` element itself, so the root node's
    // children land directly inside it. Bounds are the whole source, not the
    // root's range, so stray leading or trailing bytes survive too.
    fill_range(tree.root_node(), 0..code.len(), code, &mut children);
    MarkupNode::element("code")
        .with_attr("class", tag)
        .with_children(children)
}

/// Convert `node`'s children into markup, emitting plain text for every byte
/// of `bounds` not covered by a child. This is what makes the output
/// byte-exact: whitespace and tokens the grammar attaches nowhere still end
/// up in the tree, in order.
fn fill_range(node: Node, bounds: Range<usize>, code: &str, out: &mut Vec<MarkupNode>) {
    let mut pos = bounds.start;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.start_byte() > pos {
            out.push(MarkupNode::text(&code[pos..child.start_byte()]));
        }
        convert_node(child, code, out);
        pos = pos.max(child.end_byte());
    }
    if bounds.end > pos {
        out.push(MarkupNode::text(&code[pos..bounds.end]));
    }
}

fn convert_node(node: Node, code: &str, out: &mut Vec<MarkupNode>) {
    // Missing nodes are zero-width placeholders the parser invents during
    // error recovery; they own no source bytes.
    if node.byte_range().is_empty() {
        return;
    }

    if node.child_count() > 0 {
        if node.is_named() {
            let mut children = Vec::new();
            fill_range(node, node.byte_range(), code, &mut children);
            out.push(token_span(node.kind(), children));
        } else {
            // Anonymous interior nodes are grammar plumbing; pass their
            // contents through transparently.
            fill_range(node, node.byte_range(), code, out);
        }
        return;
    }

    let text = &code[node.byte_range()];
    if node.is_named() || is_word_token(node.kind()) {
        out.push(token_span(node.kind(), vec![MarkupNode::text(text)]));
    } else {
        // Punctuation tokens stay as plain text.
        out.push(MarkupNode::text(text));
    }
}

fn token_span(kind: &str, children: Vec<MarkupNode>) -> MarkupNode {
    MarkupNode::element("span")
        .with_attr("class", token_class(kind))
        .with_children(children)
}

/// Map a CST node kind to a stylesheet class: `type_annotation` becomes
/// `tok-type-annotation`, the `ERROR` recovery node becomes `tok-error`.
fn token_class(kind: &str) -> String {
    let mut class = String::with_capacity(4 + kind.len());
    class.push_str("tok-");
    for ch in kind.chars() {
        if ch == '_' {
            class.push('-');
        } else {
            class.push(ch.to_ascii_lowercase());
        }
    }
    class
}

/// Keyword-like anonymous tokens (`const`, `return`, `fn`) get spans;
/// punctuation does not.
fn is_word_token(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
