use dioxus::prelude::*;

/// dioxus 0.7 ships no `html` element, so extend the element set locally for
/// the document root tag emitted below.
mod dioxus_elements {
    pub use dioxus::prelude::dioxus_elements::*;

    #[allow(non_camel_case_types)]
    pub mod html {
        pub const TAG_NAME: &str = "html";
        pub const NAME_SPACE: Option<&str> = None;
    }

    pub mod elements {
        pub use dioxus::prelude::dioxus_elements::elements::*;

        pub use super::html;
    }
}

const BLOG_CSS: &str = include_str!("../../assets/blog.css");

/// Document shell shared by every generated page.
///
/// The stylesheet is inlined so each page is a single self-contained file
/// apart from images and other static assets.
#[component]
pub fn Layout(site_title: String, page_title: Option<String>, children: Element) -> Element {
    let full_title = match &page_title {
        Some(page) => format!("{page} | {site_title}"),
        None => site_title.clone(),
    };

    rsx! {
        html {
            head {
                meta { charset: "utf-8" }
                meta {
                    name: "viewport",
                    content: "width=device-width, initial-scale=1",
                }
                title { "{full_title}" }
                link { rel: "icon", href: "/favicon.ico" }
                style { {BLOG_CSS} }
            }
            body {
                main { {children} }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_layout(site_title: &str, page_title: Option<&str>) -> String {
        let mut dom = VirtualDom::new_with_props(
            Layout,
            LayoutProps {
                site_title: site_title.to_string(),
                page_title: page_title.map(String::from),
                children: rsx! {
                    p { "body copy" }
                },
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_page_title_is_joined_with_site_title() {
        let html = render_layout("inkpress", Some("About"));

        assert!(html.contains("<title>About | inkpress</title>"), "got: {html}");
    }

    #[test]
    fn test_missing_page_title_uses_site_title_alone() {
        let html = render_layout("inkpress", None);

        assert!(html.contains("<title>inkpress</title>"), "got: {html}");
    }

    #[test]
    fn test_head_declares_charset_and_viewport() {
        let html = render_layout("inkpress", None);

        assert!(html.contains(r#"charset="utf-8""#), "got: {html}");
        assert!(html.contains("width=device-width"), "got: {html}");
    }

    #[test]
    fn test_stylesheet_is_inlined_into_head() {
        let html = render_layout("inkpress", None);

        assert!(html.contains("tok-keyword"), "got: {html}");
    }

    #[test]
    fn test_children_render_inside_main() {
        let html = render_layout("inkpress", None);

        assert!(html.contains("<main>"), "got: {html}");
        assert!(html.contains("<p>body copy</p>"), "got: {html}");
    }
}
