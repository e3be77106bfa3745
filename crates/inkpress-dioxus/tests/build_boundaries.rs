//! Boundary tests for the pieces the build pipeline wires together:
//! site configuration read from disk driving engine render options, and
//! the engine emitting only markup the components know how to render.

use std::fs;
use std::path::{Path, PathBuf};

use inkpress_config::SiteConfig;
use inkpress_engine::{GrammarRegistry, MarkupNode, RenderOptions, Renderer, content};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, text: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(&path, text).expect("Failed to write fixture file");
    path
}

fn collect_tags(node: &MarkupNode, out: &mut Vec<String>) {
    if let Some(tag) = node.tag() {
        out.push(tag.to_string());
    }
    for child in node.children() {
        collect_tags(child, out);
    }
}

fn find_by_tag<'a>(node: &'a MarkupNode, tag: &str) -> Option<&'a MarkupNode> {
    if node.tag() == Some(tag) {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_by_tag(child, tag))
}

#[test]
fn config_flags_read_from_disk_drive_the_renderer() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_file(
        temp.path(),
        "inkpress.toml",
        "site_title = \"Example\"\nstrip_title_heading = true\n",
    );

    let config = SiteConfig::load_from_path(&config_path)
        .expect("Failed to load config")
        .expect("Config file should exist");
    let registry = GrammarRegistry::default();
    let renderer = Renderer::new(&registry).with_options(RenderOptions {
        allow_raw_html: config.allow_raw_html,
        strip_title_heading: config.strip_title_heading,
    });

    let article = renderer.render("# Title\n\nBody text.\n");

    let mut tags = Vec::new();
    collect_tags(&article, &mut tags);
    assert!(!tags.contains(&"h1".to_string()), "got: {tags:?}");
    assert!(tags.contains(&"p".to_string()), "got: {tags:?}");
}

#[test]
fn discovered_posts_render_from_their_relative_paths() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_file(
        temp.path(),
        "posts/2024-03-01/notes.md",
        "# Notes\n\nSome notes.\n",
    );

    let posts = content::list_posts(temp.path()).expect("Failed to list posts");
    assert_eq!(posts.len(), 1);

    let source = content::read_source(&posts[0].relative_path.to_path(temp.path()))
        .expect("Failed to read post source");
    let registry = GrammarRegistry::default();
    let article = Renderer::new(&registry).render(&source);

    assert_eq!(article.tag(), Some("article"));
    assert!(!article.children().is_empty());
}

#[test]
fn rendered_markup_uses_only_tags_the_components_handle() {
    let source = "\
# Kitchen Sink

Some *emphasis*, **strong** text, `inline code`, and a [link](/about \"About\").

![Photo](/photo.jpg)

> A quote.

3. third
4. fourth

- bullet

```ts
const x: number = 1
```

---
";
    let registry = GrammarRegistry::default();
    let article = Renderer::new(&registry).render(source);

    let known = [
        "article",
        "p",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "a",
        "img",
        "pre",
        "code",
        "span",
        "em",
        "strong",
        "ul",
        "ol",
        "li",
        "blockquote",
        "hr",
        "br",
    ];
    let mut tags = Vec::new();
    collect_tags(&article, &mut tags);
    for tag in &tags {
        assert!(known.contains(&tag.as_str()), "unhandled tag {tag} in {tags:?}");
    }
}

#[test]
fn code_fence_text_survives_markup_and_highlighting() {
    let source = "# Code\n\n```ts\nconst broken = )\nlet x =\n```\n";
    let registry = GrammarRegistry::default();
    let article = Renderer::new(&registry).render(source);

    let code = find_by_tag(&article, "code").expect("code element missing");
    assert_eq!(code.text_content(), "const broken = )\nlet x =");
}
