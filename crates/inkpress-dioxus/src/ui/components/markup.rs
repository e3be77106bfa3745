use dioxus::prelude::*;
use inkpress_engine::MarkupNode;

/// Renders an engine markup tree as Dioxus elements.
///
/// Every tag the renderer emits has an explicit arm so attribute handling
/// stays visible; anything unrecognized degrades to a `span` rather than
/// being dropped.
#[component]
pub fn Markup(node: MarkupNode) -> Element {
    match node {
        MarkupNode::Text(text) => rsx! { "{text}" },
        MarkupNode::Raw(html) => rsx! {
            span { dangerous_inner_html: html }
        },
        MarkupNode::Element {
            tag,
            attrs,
            children,
        } => match tag.as_str() {
            "article" => rsx! {
                article { {markup_children(children)} }
            },
            "p" => rsx! {
                p { {markup_children(children)} }
            },
            "h1" => {
                let id = attrs.get("id").cloned();
                rsx! {
                    h1 { id, {markup_children(children)} }
                }
            }
            "h2" => {
                let id = attrs.get("id").cloned();
                rsx! {
                    h2 { id, {markup_children(children)} }
                }
            }
            "h3" => {
                let id = attrs.get("id").cloned();
                rsx! {
                    h3 { id, {markup_children(children)} }
                }
            }
            "h4" => {
                let id = attrs.get("id").cloned();
                rsx! {
                    h4 { id, {markup_children(children)} }
                }
            }
            "h5" => {
                let id = attrs.get("id").cloned();
                rsx! {
                    h5 { id, {markup_children(children)} }
                }
            }
            "h6" => {
                let id = attrs.get("id").cloned();
                rsx! {
                    h6 { id, {markup_children(children)} }
                }
            }
            "a" => {
                let href = attrs.get("href").cloned();
                let title = attrs.get("title").cloned();
                rsx! {
                    a { href, title, {markup_children(children)} }
                }
            }
            "img" => {
                let src = attrs.get("src").cloned();
                let srcset = attrs.get("srcset").cloned();
                let alt = attrs.get("alt").cloned();
                let title = attrs.get("title").cloned();
                rsx! {
                    img { src, srcset, alt, title }
                }
            }
            "pre" => rsx! {
                pre { {markup_children(children)} }
            },
            "code" => {
                let class = attrs.get("class").cloned();
                rsx! {
                    code { class, {markup_children(children)} }
                }
            }
            "span" => {
                let class = attrs.get("class").cloned();
                rsx! {
                    span { class, {markup_children(children)} }
                }
            }
            "em" => rsx! {
                em { {markup_children(children)} }
            },
            "strong" => rsx! {
                strong { {markup_children(children)} }
            },
            "ul" => rsx! {
                ul { {markup_children(children)} }
            },
            "ol" => {
                let start = attrs.get("start").cloned();
                rsx! {
                    ol { start, {markup_children(children)} }
                }
            }
            "li" => rsx! {
                li { {markup_children(children)} }
            },
            "blockquote" => rsx! {
                blockquote { {markup_children(children)} }
            },
            "hr" => rsx! {
                hr {}
            },
            "br" => rsx! {
                br {}
            },
            _ => rsx! {
                span { {markup_children(children)} }
            },
        },
    }
}

fn markup_children(nodes: Vec<MarkupNode>) -> Element {
    rsx! {
        for child in nodes {
            Markup { node: child }
        }
    }
}
