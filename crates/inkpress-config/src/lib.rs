use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Name of the config file looked up in the site root.
pub const CONFIG_FILE_NAME: &str = "inkpress.toml";

/// Site-wide build configuration.
///
/// Every field has a default, so an empty or absent `inkpress.toml` is a
/// valid configuration. Directory fields go through shell expansion, so
/// `~/sites/blog/content` and `$BLOG_ROOT/content` both work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Shown in page titles and as the fallback when a page has none.
    pub site_title: String,
    /// Where pages and posts live, relative to the site root.
    pub content_dir: PathBuf,
    /// Where generated HTML is written, relative to the site root.
    pub output_dir: PathBuf,
    /// Drop the leading `# Title` heading from rendered bodies.
    pub strip_title_heading: bool,
    /// Pass literal HTML in Markdown through unescaped.
    pub allow_raw_html: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "inkpress".to_string(),
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            strip_title_heading: false,
            allow_raw_html: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from an explicit path. A missing file is not an
    /// error; it returns `Ok(None)` and the caller applies defaults.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: SiteConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured directories
        config.content_dir = Self::expand_path(&config.content_dir).unwrap_or(config.content_dir);
        config.output_dir = Self::expand_path(&config.output_dir).unwrap_or(config.output_dir);

        Ok(Some(config))
    }

    /// Load `inkpress.toml` from the site root, falling back to defaults
    /// when the file is absent.
    pub fn load_from_site_root(site_root: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(site_root.join(CONFIG_FILE_NAME))?.unwrap_or_default())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
