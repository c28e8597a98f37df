//! Post models

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ContentError, Result};
use super::FrontMatter;
use crate::helpers::is_iso_date;

/// Metadata of a blog post, enough to list it without rendering the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    /// Filename stem; unique within a content directory
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as written by the author; sorted as a string
    pub date: String,

    /// Author name
    pub author: String,

    /// Summary shown on listings
    pub excerpt: String,

    /// Category label
    pub category: String,

    /// Whether the post is highlighted on the index
    #[serde(default)]
    pub featured: bool,
}

/// A blog post with its rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Rendered HTML content
    pub content: String,
}

impl PostMeta {
    /// Names of the front-matter fields every post must carry
    pub const REQUIRED_FIELDS: [&'static str; 5] = ["title", "date", "author", "excerpt", "category"];

    /// Build metadata from decoded front-matter.
    ///
    /// A field that is absent or blank counts as missing. When `strict` is
    /// set, missing fields are an error naming all of them; otherwise they
    /// are left empty.
    pub fn from_front_matter(
        slug: impl Into<String>,
        fm: FrontMatter,
        path: &Path,
        strict: bool,
    ) -> Result<Self> {
        let FrontMatter {
            title,
            date,
            author,
            excerpt,
            category,
            featured,
            ..
        } = fm;

        let fields = [title, date, author, excerpt, category]
            .map(|value| value.filter(|v| !v.trim().is_empty()));

        let missing: Vec<&'static str> = Self::REQUIRED_FIELDS
            .iter()
            .zip(fields.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        if strict && !missing.is_empty() {
            return Err(ContentError::MissingFields {
                path: path.to_path_buf(),
                fields: missing,
            });
        }

        let [title, date, author, excerpt, category] = fields.map(Option::unwrap_or_default);

        if !date.is_empty() && !is_iso_date(&date) {
            tracing::warn!(
                "Date {:?} in {:?} is not ISO-8601; posts are ordered by plain string comparison",
                date,
                path
            );
        }

        Ok(Self {
            slug: slug.into(),
            title,
            date,
            author,
            excerpt,
            category,
            featured: featured.unwrap_or(false),
        })
    }
}

impl Post {
    /// Assemble a post from its metadata and rendered body
    pub fn new(meta: PostMeta, content: String) -> Self {
        Self { meta, content }
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }
}

/// Sort posts newest first by comparing date strings, then by slug
pub fn sort_by_date_desc(posts: &mut [PostMeta]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FrontMatter {
        FrontMatter {
            title: Some("Company Brain".to_string()),
            date: Some("2024-05-01".to_string()),
            author: Some("Ana".to_string()),
            excerpt: Some("Why meeting data matters.".to_string()),
            category: Some("Product".to_string()),
            ..Default::default()
        }
    }

    fn meta(slug: &str, date: &str) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: date.to_string(),
            author: String::new(),
            excerpt: String::new(),
            category: String::new(),
            featured: false,
        }
    }

    #[test]
    fn test_from_complete_front_matter() {
        let meta =
            PostMeta::from_front_matter("company-brain", complete(), Path::new("x.md"), true)
                .unwrap();
        assert_eq!(meta.slug, "company-brain");
        assert_eq!(meta.title, "Company Brain");
        assert_eq!(meta.category, "Product");
        assert!(!meta.featured);
    }

    #[test]
    fn test_strict_reports_every_missing_field() {
        let fm = FrontMatter {
            title: Some("Only a title".to_string()),
            author: Some("   ".to_string()),
            ..Default::default()
        };
        let err = PostMeta::from_front_matter("x", fm, Path::new("x.md"), true).unwrap_err();
        match err {
            ContentError::MissingFields { fields, .. } => {
                assert_eq!(fields, vec!["date", "author", "excerpt", "category"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_fills_blanks() {
        let fm = FrontMatter {
            title: Some("Draft".to_string()),
            featured: Some(true),
            ..Default::default()
        };
        let meta = PostMeta::from_front_matter("draft", fm, Path::new("draft.md"), false).unwrap();
        assert_eq!(meta.title, "Draft");
        assert_eq!(meta.date, "");
        assert_eq!(meta.author, "");
        assert!(meta.featured);
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut posts = vec![
            meta("b", "2024-01-02"),
            meta("c", "2024-03-01"),
            meta("a", "2024-01-02"),
            meta("d", "2023-12-31"),
        ];
        sort_by_date_desc(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_post_serializes_flat() {
        let post = Post::new(meta("hello", "2024-01-01"), "<p>Hi</p>\n".to_string());
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["content"], "<p>Hi</p>\n");
        assert_eq!(json["featured"], false);
    }
}
