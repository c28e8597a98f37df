//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Default author for scaffolded posts
    pub author: String,

    // URL
    pub root: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,

    // Writing
    pub default_category: String,
    /// Reject posts whose front-matter lacks a required field
    pub strict_front_matter: bool,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),

            root: "/".to_string(),

            content_dir: "content/blog".to_string(),
            static_dir: "static".to_string(),

            default_category: "general".to_string(),
            strict_front_matter: true,
            markdown: MarkdownConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GFM-style extensions (tables, footnotes, task lists, ...)
    pub extensions: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert!(config.strict_front_matter);
        assert!(!config.markdown.extensions);
        assert!(!config.markdown.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Company Brain
author: Marketing Team
content_dir: src/content/blog
strict_front_matter: false
markdown:
  extensions: true
  highlight:
    enable: true
    line_number: true
analytics_id: G-123
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Company Brain");
        assert_eq!(config.author, "Marketing Team");
        assert_eq!(config.content_dir, "src/content/blog");
        assert!(!config.strict_front_matter);
        assert!(config.markdown.extensions);
        assert!(config.markdown.highlight.enable);
        assert!(config.markdown.highlight.line_number);
        assert_eq!(config.markdown.highlight.theme, "base16-ocean.dark");
        assert!(config.extra.contains_key("analytics_id"));
    }
}
