//! mdblog-rs: markdown blog content store
//!
//! Loads blog posts authored as markdown files with a front-matter header,
//! renders them to HTML and serves them by slug. A CLI and a small preview
//! server sit on top of the store.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::{ContentStore, MarkdownRenderer};

/// A blog site rooted at a base directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Directory holding `<slug>.md` post files
    pub content_dir: std::path::PathBuf,
    /// Directory served under `/static`
    pub static_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            content_dir,
            static_dir,
        }
    }

    /// Build the content store configured for this site
    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.content_dir)
            .with_renderer(MarkdownRenderer::from_config(&self.config.markdown))
            .strict(self.config.strict_front_matter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("content/blog"));
        assert_eq!(site.static_dir, dir.path().join("static"));
    }

    #[test]
    fn test_site_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "title: Launch Notes\ncontent_dir: posts\nstrict_front_matter: false\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Launch Notes");
        assert_eq!(site.store().content_dir(), dir.path().join("posts"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_config.yml"), "title: [broken\n").unwrap();
        assert!(Site::new(dir.path()).is_err());
    }
}
