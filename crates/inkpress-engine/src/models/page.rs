use relative_path::RelativePathBuf;

/// A singleton page: one `.md` file directly under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub relative_path: RelativePathBuf,
}

impl Page {
    /// Site-absolute URL path. The `index` page maps to the site root.
    pub fn url_path(&self) -> String {
        if self.slug == "index" {
            "/".to_string()
        } else {
            format!("/{}", self.slug)
        }
    }
}
