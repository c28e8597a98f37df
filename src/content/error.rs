//! Error types for content loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `ContentError`.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Failures while loading posts from the content directory.
///
/// A missing content directory and a missing post file are not errors: they
/// surface as empty listings and `None` lookups.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Slug rejected before it was joined to a path.
    #[error("invalid slug {slug:?}: {reason}")]
    InvalidSlug { slug: String, reason: &'static str },

    /// File or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Front-matter block is malformed or does not decode.
    #[error("front-matter error in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    /// Front-matter decoded but required fields are absent.
    #[error("front-matter in {path} is missing {}", .fields.join(", "))]
    MissingFields {
        path: PathBuf,
        fields: Vec<&'static str>,
    },
}

impl ContentError {
    /// Create a new invalid slug error.
    pub fn invalid_slug(slug: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidSlug {
            slug: slug.into(),
            reason,
        }
    }

    /// Create a new I/O error tagged with the path being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new front-matter error.
    pub fn front_matter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FrontMatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error comes from the author's file rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::FrontMatter { .. } | Self::MissingFields { .. })
    }
}
