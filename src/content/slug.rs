//! Slug validation

use super::error::{ContentError, Result};

/// Check that a slug can be joined to the content directory safely.
///
/// Slugs come from URLs and CLI arguments, so anything that could escape the
/// directory or name a hidden file is rejected.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(ContentError::invalid_slug(slug, "slug is empty"));
    }
    if slug.contains(['/', '\\']) {
        return Err(ContentError::invalid_slug(
            slug,
            "contains a path separator",
        ));
    }
    if slug.contains('\0') {
        return Err(ContentError::invalid_slug(slug, "contains a NUL byte"));
    }
    if slug.contains("..") {
        return Err(ContentError::invalid_slug(slug, "contains `..`"));
    }
    if slug.starts_with('.') {
        return Err(ContentError::invalid_slug(slug, "starts with `.`"));
    }
    Ok(())
}

/// Derive a slug for a new post from its title
pub fn slug_from_title(title: &str) -> String {
    ::slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_slugs() {
        assert!(validate_slug("company-brain-meeting-data").is_ok());
        assert!(validate_slug("post_2024.v2").is_ok());
        assert!(validate_slug("Über-uns").is_ok());
    }

    #[test]
    fn test_rejects_traversal() {
        for slug in ["", "..", "../secret", "a/b", "a\\b", ".hidden", "a..b", "x\0y"] {
            assert!(
                matches!(validate_slug(slug), Err(ContentError::InvalidSlug { .. })),
                "expected {:?} to be rejected",
                slug
            );
        }
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(
            slug_from_title("Workflow Automation: Meeting Notes!"),
            "workflow-automation-meeting-notes"
        );
        assert!(validate_slug(&slug_from_title("Hello World")).is_ok());
    }
}
