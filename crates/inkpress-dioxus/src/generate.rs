//! Static site build pipeline.
//!
//! Discovers pages and posts under the content directory, renders each one
//! through the engine and the Dioxus components, and writes the finished
//! HTML tree to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dioxus::dioxus_core::VirtualDom;
use rayon::prelude::*;

use inkpress_config::SiteConfig;
use inkpress_engine::{GrammarRegistry, RenderOptions, Renderer, content};

use crate::ui::pages::{
    ContentPage, ContentPageProps, PostListPage, PostListPageProps, PostPage, PostPageProps,
};

/// Builds the site rooted at `site_root` into its configured output directory.
pub fn generate(site_root: &Path) -> Result<()> {
    let config = SiteConfig::load_from_site_root(site_root)?;
    let content_dir = site_root.join(&config.content_dir);
    let output_dir = site_root.join(&config.output_dir);

    let pages = content::list_pages(&content_dir)?;
    let posts = content::list_posts(&content_dir)?;
    log::info!(
        "Found {} pages and {} posts under {}",
        pages.len(),
        posts.len(),
        content_dir.display()
    );

    if pages.iter().any(|page| page.slug == "posts") {
        bail!("Page slug 'posts' collides with the generated post listing");
    }

    let registry = GrammarRegistry::default();
    let options = RenderOptions {
        allow_raw_html: config.allow_raw_html,
        strip_title_heading: config.strip_title_heading,
    };
    let renderer = Renderer::new(&registry).with_options(options);

    let mut documents: Vec<(String, String)> = pages
        .par_iter()
        .map(|page| -> Result<(String, String)> {
            let source = content::read_source(&page.relative_path.to_path(&content_dir))?;
            let body = renderer.render(&source);
            let page_title = (page.slug != "index").then(|| page.title.clone());
            let dom = VirtualDom::new_with_props(
                ContentPage,
                ContentPageProps {
                    site_title: config.site_title.clone(),
                    page_title,
                    body,
                },
            );
            Ok((page.url_path(), render_document(dom)))
        })
        .collect::<Result<_>>()?;

    let post_documents: Vec<(String, String)> = posts
        .par_iter()
        .map(|post| -> Result<(String, String)> {
            let source = content::read_source(&post.relative_path.to_path(&content_dir))?;
            let body = renderer.render(&source);
            let dom = VirtualDom::new_with_props(
                PostPage,
                PostPageProps {
                    site_title: config.site_title.clone(),
                    title: post.title.clone(),
                    body,
                },
            );
            Ok((post.url_path(), render_document(dom)))
        })
        .collect::<Result<_>>()?;
    documents.extend(post_documents);

    let listing = VirtualDom::new_with_props(
        PostListPage,
        PostListPageProps {
            site_title: config.site_title.clone(),
            posts: posts.clone(),
        },
    );
    documents.push(("/posts".to_string(), render_document(listing)));

    for (route, html) in &documents {
        let path = route_output_path(&output_dir, route);
        write_document(&path, html)?;
    }

    let static_dir = site_root.join("static");
    if static_dir.is_dir() {
        copy_dir_recursive(&static_dir, &output_dir)?;
        log::info!("Copied static files from {}", static_dir.display());
    }

    log::info!(
        "Wrote {} documents to {}",
        documents.len(),
        output_dir.display()
    );
    Ok(())
}

fn render_document(mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    format!("<!DOCTYPE html>\n{}", dioxus_ssr::render(&dom))
}

/// Maps a site-absolute route to its file in the output tree. Every route
/// becomes a directory with an `index.html` so URLs need no extension.
fn route_output_path(output_dir: &Path, route: &str) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}

fn write_document(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;
    for entry in
        fs::read_dir(from).with_context(|| format!("Failed to read {}", from.display()))?
    {
        let entry = entry?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if source.is_dir() {
            copy_dir_recursive(&source, &target)?;
        } else {
            fs::copy(&source, &target)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write_file(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
    }

    fn sample_site() -> TempDir {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path();
        write_file(root, "inkpress.toml", "site_title = \"Example\"\n");
        write_file(root, "content/index.md", "# Home\n\nWelcome home.\n");
        write_file(root, "content/about.md", "# About\n\nAll about me.\n");
        write_file(
            root,
            "content/posts/2023-01-01/january.md",
            "# January Post\n\nCold outside.\n",
        );
        write_file(
            root,
            "content/posts/2023-06-01/june.md",
            "# June Post\n\nWarm outside.\n",
        );
        write_file(root, "static/favicon.ico", "icon-bytes");
        temp
    }

    fn read_output(temp: &TempDir, relative: &str) -> String {
        fs::read_to_string(temp.path().join("dist").join(relative))
            .expect("Failed to read generated file")
    }

    #[test]
    fn test_builds_every_route() {
        // Given a site with two pages and two posts
        let temp = sample_site();

        // When the site is generated
        generate(temp.path()).expect("Build failed");

        // Then each route has a directory-style index.html
        let dist = temp.path().join("dist");
        assert!(dist.join("index.html").is_file());
        assert!(dist.join("about/index.html").is_file());
        assert!(dist.join("posts/index.html").is_file());
        assert!(dist.join("posts/2023-01-01/january/index.html").is_file());
        assert!(dist.join("posts/2023-06-01/june/index.html").is_file());
    }

    #[test]
    fn test_documents_start_with_a_doctype() {
        let temp = sample_site();

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "index.html");
        assert!(html.starts_with("<!DOCTYPE html>"), "got: {html}");
    }

    #[test]
    fn test_listing_orders_posts_newest_first() {
        let temp = sample_site();

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "posts/index.html");
        let june = html.find("June Post").expect("June Post missing");
        let january = html.find("January Post").expect("January Post missing");
        assert!(june < january, "got: {html}");
    }

    #[test]
    fn test_listing_links_each_post() {
        let temp = sample_site();

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "posts/index.html");
        assert!(
            html.contains(r#"<a href="/posts/2023-06-01/june">June Post</a>"#),
            "got: {html}"
        );
    }

    #[test]
    fn test_page_titles_use_the_configured_site_title() {
        let temp = sample_site();

        generate(temp.path()).expect("Build failed");

        let about = read_output(&temp, "about/index.html");
        assert!(about.contains("<title>About | Example</title>"), "got: {about}");

        // The index page gets the site title alone.
        let index = read_output(&temp, "index.html");
        assert!(index.contains("<title>Example</title>"), "got: {index}");
    }

    #[test]
    fn test_static_files_are_copied_into_the_output() {
        let temp = sample_site();

        generate(temp.path()).expect("Build failed");

        let copied = fs::read_to_string(temp.path().join("dist/favicon.ico"))
            .expect("favicon missing from output");
        assert_eq!(copied, "icon-bytes");
    }

    #[test]
    fn test_code_fences_are_highlighted_in_the_final_html() {
        let temp = sample_site();
        write_file(
            temp.path(),
            "content/snippets.md",
            "# Snippets\n\n```ts\nconst x = 1\n```\n",
        );

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "snippets/index.html");
        assert!(html.contains(r#"<code class="language-ts">"#), "got: {html}");
        assert!(
            html.contains(r#"<span class="tok-const">const</span>"#),
            "got: {html}"
        );
    }

    #[test]
    fn test_raw_html_is_escaped_by_default() {
        let temp = sample_site();
        write_file(
            temp.path(),
            "content/embeds.md",
            "# Embeds\n\n<video controls></video>\n",
        );

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "embeds/index.html");
        assert!(html.contains("&lt;video"), "got: {html}");
        assert!(!html.contains("<video controls>"), "got: {html}");
    }

    #[test]
    fn test_raw_html_passes_through_when_enabled() {
        let temp = sample_site();
        write_file(
            temp.path(),
            "inkpress.toml",
            "site_title = \"Example\"\nallow_raw_html = true\n",
        );
        write_file(
            temp.path(),
            "content/embeds.md",
            "# Embeds\n\n<video controls></video>\n",
        );

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "embeds/index.html");
        assert!(html.contains("<video controls></video>"), "got: {html}");
    }

    #[test]
    fn test_strip_title_heading_removes_the_leading_h1() {
        let temp = sample_site();
        write_file(
            temp.path(),
            "inkpress.toml",
            "site_title = \"Example\"\nstrip_title_heading = true\n",
        );

        generate(temp.path()).expect("Build failed");

        let html = read_output(&temp, "about/index.html");
        assert!(!html.contains("<h1"), "got: {html}");
        assert!(html.contains("All about me."), "got: {html}");
        // The title still comes from the stripped heading.
        assert!(html.contains("<title>About | Example</title>"), "got: {html}");
    }

    #[test]
    fn test_malformed_document_aborts_the_build_with_its_path() {
        let temp = sample_site();
        write_file(
            temp.path(),
            "content/posts/2023-07-01/broken.md",
            "no heading here\n",
        );

        let err = generate(temp.path()).expect_err("Build should fail");

        assert!(format!("{err:#}").contains("broken.md"), "got: {err:#}");
    }

    #[test]
    fn test_page_named_posts_is_rejected() {
        let temp = sample_site();
        write_file(temp.path(), "content/posts.md", "# Posts\n");

        let err = generate(temp.path()).expect_err("Build should fail");

        assert!(format!("{err}").contains("posts"), "got: {err}");
    }

    #[rstest]
    #[case("/", "/tmp/out/index.html")]
    #[case("/about", "/tmp/out/about/index.html")]
    #[case("/posts/2023-06-01/june", "/tmp/out/posts/2023-06-01/june/index.html")]
    fn test_route_maps_to_directory_index(#[case] route: &str, #[case] expected: &str) {
        let output = Path::new("/tmp/out");
        assert_eq!(route_output_path(output, route), PathBuf::from(expected));
    }
}
