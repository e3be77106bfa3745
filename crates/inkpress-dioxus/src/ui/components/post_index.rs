use dioxus::prelude::*;
use inkpress_engine::Post;

/// Table of posts, one row per post in the order the caller supplies.
#[component]
pub fn PostIndex(posts: Vec<Post>) -> Element {
    rsx! {
        table { class: "posts",
            tbody {
                for post in posts {
                    tr { key: "{post.url_path()}",
                        td { class: "date", "{post.date}" }
                        td { class: "dot", "·" }
                        td {
                            a { href: post.url_path(), "{post.title}" }
                        }
                    }
                }
            }
        }
    }
}
