//! Content directory access: titles, sources, and post/page listings.
//!
//! Layout contract: dated posts live at `posts/<yyyy-mm-dd>/<slug>.md` under
//! the content root, singleton pages as `<slug>.md` directly in the root.
//! Every content file must start with a `# Title` line; that line is the
//! document's title and stays in the body unless the renderer is told to
//! strip it.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::Regex;
use relative_path::RelativePathBuf;

use crate::models::{Page, Post};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Malformed document {path}: first line must be a level-1 heading")]
    MalformedDocument { path: PathBuf },
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
}

/// Extract a document's title by reading only its first line.
///
/// Opens the file, reads up to the first line terminator, and closes it
/// again; the rest of the file is never pulled in. A first line that is not
/// a `# ` heading makes the document malformed, which is fatal to the build
/// because every page link needs a title.
pub fn read_title(path: &Path) -> Result<String, ContentError> {
    if !path.exists() {
        return Err(ContentError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;
    match first_line.strip_prefix("# ") {
        Some(title) => Ok(title.trim_end().to_string()),
        None => Err(ContentError::MalformedDocument {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a whole content document.
pub fn read_source(path: &Path) -> Result<String, ContentError> {
    if !path.exists() {
        return Err(ContentError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(ContentError::Io)
}

/// List all dated posts under `<content_root>/posts`, newest first.
///
/// Each date directory must match `yyyy-mm-dd`; other entries are skipped.
/// Posts within one date sort by slug so the listing is fully deterministic.
/// Title extraction failures propagate: one malformed post aborts the whole
/// listing.
pub fn list_posts(content_root: &Path) -> Result<Vec<Post>, ContentError> {
    let posts_dir = content_root.join("posts");
    if !posts_dir.is_dir() {
        return Err(ContentError::InvalidContentDir(format!(
            "posts directory not found in {}",
            content_root.display()
        )));
    }

    let mut posts = Vec::new();
    for date_entry in fs::read_dir(&posts_dir)? {
        let date_entry = date_entry?;
        let date_path = date_entry.path();
        let Some(date) = date_dir_name(&date_path) else {
            continue;
        };

        for post_entry in fs::read_dir(&date_path)? {
            let post_entry = post_entry?;
            let post_path = post_entry.path();
            if post_path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(slug) = post_path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let title = read_title(&post_path)?;
            let relative_path = RelativePathBuf::from(format!("posts/{date}/{slug}.md"));
            posts.push(Post {
                date: date.clone(),
                slug: slug.to_string(),
                title,
                relative_path,
            });
        }
    }

    // Newest first; lexicographic order on yyyy-mm-dd is date order.
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

/// List singleton pages: `.md` files directly in the content root.
pub fn list_pages(content_root: &Path) -> Result<Vec<Page>, ContentError> {
    if !content_root.is_dir() {
        return Err(ContentError::InvalidContentDir(format!(
            "content directory not found: {}",
            content_root.display()
        )));
    }

    let mut pages = Vec::new();
    for entry in fs::read_dir(content_root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let title = read_title(&path)?;
        pages.push(Page {
            slug: slug.to_string(),
            title,
            relative_path: RelativePathBuf::from(format!("{slug}.md")),
        });
    }

    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(pages)
}

/// The directory's name when it is a valid `yyyy-mm-dd` date directory.
fn date_dir_name(path: &Path) -> Option<String> {
    use std::sync::OnceLock;

    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    let date_regex = DATE_REGEX
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

    if !path.is_dir() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    if date_regex.is_match(name) {
        Some(name.to_string())
    } else {
        None
    }
}
