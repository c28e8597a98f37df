//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::slug::{slug_from_title, validate_slug};
use crate::content::store::MARKDOWN_EXTENSION;
use crate::Site;

/// Optional overrides for a scaffolded post
#[derive(Debug, Default, Clone)]
pub struct NewPostOptions {
    pub slug: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<String>,
}

/// Create a new post file with a complete front-matter block
///
/// Returns the path of the created file.
pub fn create_post(site: &Site, title: &str, options: &NewPostOptions) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let slug = options
        .slug
        .clone()
        .unwrap_or_else(|| slug_from_title(title));
    validate_slug(&slug)?;

    let author = options.author.as_deref().unwrap_or(&site.config.author);
    // Strict validation rejects a blank excerpt
    let excerpt = options.excerpt.as_deref().unwrap_or(title);
    let category = options
        .category
        .as_deref()
        .unwrap_or(&site.config.default_category);

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site
        .content_dir
        .join(format!("{}.{}", slug, MARKDOWN_EXTENSION));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\nauthor: {}\nexcerpt: {}\ncategory: {}\nfeatured: false\n---\n\n",
        yaml_string(title),
        today,
        yaml_string(author),
        yaml_string(excerpt),
        yaml_string(category),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Quote a value as a YAML string
fn yaml_string(value: &str) -> String {
    // JSON strings are valid YAML double-quoted scalars
    serde_json::Value::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Meeting Notes: A Guide", &NewPostOptions::default()).unwrap();
        assert_eq!(path, site.content_dir.join("meeting-notes-a-guide.md"));

        let source = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&source, &path).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Meeting Notes: A Guide"));
        assert_eq!(fm.category.as_deref(), Some("general"));
        assert_eq!(fm.excerpt.as_deref(), Some("Meeting Notes: A Guide"));
        assert_eq!(fm.featured, Some(false));
        assert!(fm.date.is_some());
        assert!(body.is_empty());
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let options = NewPostOptions {
            slug: Some("launch".to_string()),
            ..Default::default()
        };

        create_post(&site, "Launch", &options).unwrap();
        assert!(create_post(&site, "Launch again", &options).is_err());
    }

    #[test]
    fn test_create_post_rejects_bad_slug() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let options = NewPostOptions {
            slug: Some("../escape".to_string()),
            ..Default::default()
        };
        assert!(create_post(&site, "Escape", &options).is_err());
        assert!(!dir.path().join("content/escape.md").exists());
    }
}
