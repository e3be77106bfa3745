use std::collections::{HashMap, HashSet};

use deunicode::deunicode;

/// Turn heading text into a URL-safe anchor slug.
///
/// Unicode is transliterated to ASCII, everything that is not alphanumeric
/// collapses to a single hyphen, and the result is lowercased. Text with no
/// usable characters falls back to `"section"` so anchors are never empty.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut gap = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Per-document slug allocator.
///
/// Repeated heading text gets a numeric suffix so every anchor in a document
/// stays unique: the first `Intro` becomes `intro`, the second `intro-1`, and
/// so on. State is scoped to one document; create a fresh `Slugger` per
/// render.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next free slug for the given heading text.
    ///
    /// A suffixed candidate can itself collide with a slug some other heading
    /// already produced (`Intro 1` slugs to `intro-1`), so candidates are
    /// checked against everything issued so far, not just the per-base count.
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut count = self.counts.get(&base).copied().unwrap_or(0);
        let mut slug = if count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        while !self.issued.insert(slug.clone()) {
            count += 1;
            slug = format!("{base}-{count}");
        }
        self.counts.insert(base, count + 1);
        slug
    }
}
