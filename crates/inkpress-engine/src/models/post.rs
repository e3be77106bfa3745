use relative_path::RelativePathBuf;

/// A dated blog post discovered in the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Publication date in `yyyy-mm-dd` form, taken from the directory name.
    pub date: String,
    /// URL slug, taken from the file name without extension.
    pub slug: String,
    /// Title extracted from the file's first line.
    pub title: String,
    /// Location relative to the content root.
    pub relative_path: RelativePathBuf,
}

impl Post {
    /// Site-absolute URL path for this post.
    pub fn url_path(&self) -> String {
        format!("/posts/{}/{}", self.date, self.slug)
    }
}
