use dioxus::prelude::*;
use inkpress_engine::{MarkupNode, Post};

use super::components::{Layout, Markup, PostIndex};

/// A page rendered from a top-level markdown file.
#[component]
pub fn ContentPage(site_title: String, page_title: Option<String>, body: MarkupNode) -> Element {
    rsx! {
        Layout { site_title, page_title,
            Markup { node: body }
        }
    }
}

/// A dated post.
#[component]
pub fn PostPage(site_title: String, title: String, body: MarkupNode) -> Element {
    rsx! {
        Layout { site_title, page_title: Some(title),
            Markup { node: body }
        }
    }
}

/// The chronological post listing.
#[component]
pub fn PostListPage(site_title: String, posts: Vec<Post>) -> Element {
    rsx! {
        Layout { site_title, page_title: Some("Posts".to_string()),
            article {
                h1 { "Posts" }
                PostIndex { posts }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use relative_path::RelativePathBuf;

    #[test]
    fn test_content_page_places_body_inside_layout() {
        let body = MarkupNode::element("article")
            .with_children(vec![MarkupNode::element("p")
                .with_children(vec![MarkupNode::text("welcome")])]);
        let mut dom = VirtualDom::new_with_props(
            ContentPage,
            ContentPageProps {
                site_title: "inkpress".to_string(),
                page_title: Some("About".to_string()),
                body,
            },
        );
        dom.rebuild_in_place();

        let html = render(&dom);

        assert!(html.contains("<title>About | inkpress</title>"), "got: {html}");
        assert!(html.contains("<article>"), "got: {html}");
        assert!(html.contains("<p>welcome</p>"), "got: {html}");
    }

    #[test]
    fn test_post_page_uses_the_post_title() {
        let body = MarkupNode::element("article");
        let mut dom = VirtualDom::new_with_props(
            PostPage,
            PostPageProps {
                site_title: "inkpress".to_string(),
                title: "First Post".to_string(),
                body,
            },
        );
        dom.rebuild_in_place();

        let html = render(&dom);

        assert!(
            html.contains("<title>First Post | inkpress</title>"),
            "got: {html}"
        );
    }

    #[test]
    fn test_post_list_page_links_every_post() {
        let posts = vec![Post {
            date: "2024-02-02".to_string(),
            slug: "notes".to_string(),
            title: "Notes".to_string(),
            relative_path: RelativePathBuf::from("posts/2024-02-02/notes.md"),
        }];
        let mut dom = VirtualDom::new_with_props(
            PostListPage,
            PostListPageProps {
                site_title: "inkpress".to_string(),
                posts,
            },
        );
        dom.rebuild_in_place();

        let html = render(&dom);

        assert!(html.contains("<title>Posts | inkpress</title>"), "got: {html}");
        assert!(html.contains("<article><h1>Posts</h1>"), "got: {html}");
        assert!(
            html.contains(r#"<a href="/posts/2024-02-02/notes">Notes</a>"#),
            "got: {html}"
        );
    }
}
