//! Content store - loads posts from the content directory
//!
//! Every query reads the directory afresh; the store keeps no content
//! between calls. Each operation comes in two forms: `try_*` returns a
//! `Result` so callers can tell "no content" from "content failed to load",
//! and the plain form logs failures and degrades to an empty listing or
//! `None` so a page can always render.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::post::sort_by_date_desc;
use super::slug::validate_slug;
use super::{FrontMatter, MarkdownRenderer, Post, PostMeta};

/// Extension of post files; the slug is the filename without it
pub const MARKDOWN_EXTENSION: &str = "md";

/// Read-only view over a directory of markdown posts
#[derive(Clone)]
pub struct ContentStore {
    content_dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
    strict: bool,
}

/// Result of loading every post without stopping at the first failure
#[derive(Debug, Default)]
pub struct Scan {
    /// Posts that loaded, newest first
    pub posts: Vec<PostMeta>,
    /// Slugs that failed to load, with the reason
    pub failures: Vec<(String, ContentError)>,
}

impl ContentStore {
    /// Create a store over `content_dir` with a CommonMark renderer and
    /// strict front-matter validation
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            renderer: Arc::new(MarkdownRenderer::new()),
            strict: true,
        }
    }

    /// Use a custom markdown renderer
    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Toggle rejection of posts with missing required front-matter fields
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// List metadata of all posts, newest first; empty on any failure
    pub fn list_all(&self) -> Vec<PostMeta> {
        self.try_list_all().unwrap_or_else(|e| {
            tracing::warn!("Failed to load posts from {:?}: {}", self.content_dir, e);
            Vec::new()
        })
    }

    /// List metadata of all posts, newest first
    ///
    /// The first file that fails to read or validate aborts the listing.
    pub fn try_list_all(&self) -> Result<Vec<PostMeta>> {
        let mut posts = self
            .post_files()?
            .into_iter()
            .map(|(slug, path)| self.load_meta(slug, &path))
            .collect::<Result<Vec<_>>>()?;

        sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    /// Load metadata of all posts, collecting per-file failures
    pub fn scan(&self) -> Result<Scan> {
        let mut scan = Scan::default();

        for (slug, path) in self.post_files()? {
            match self.load_meta(slug.clone(), &path) {
                Ok(meta) => scan.posts.push(meta),
                Err(e) => {
                    tracing::debug!("Post {:?} failed to load: {}", slug, e);
                    scan.failures.push((slug, e));
                }
            }
        }

        sort_by_date_desc(&mut scan.posts);
        Ok(scan)
    }

    /// Look up and render a post; `None` when missing or on any failure
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        match self.try_get_by_slug(slug) {
            Ok(post) => post,
            Err(e @ ContentError::InvalidSlug { .. }) => {
                tracing::debug!("Rejected lookup: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", slug, e);
                None
            }
        }
    }

    /// Look up and render a post
    ///
    /// Returns `Ok(None)` when no file exists for the slug. The slug is
    /// validated before it touches the filesystem.
    pub fn try_get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        validate_slug(slug)?;

        let path = self.post_path(slug);
        let Some(source) = read_source(&path)? else {
            tracing::debug!("No post file at {:?}", path);
            return Ok(None);
        };

        let (meta, body) = self.parse(slug, &path, &source)?;
        let content = self.renderer.render(&body);

        Ok(Some(Post::new(meta, content)))
    }

    /// List the slugs of all post files; empty on any failure
    pub fn list_slugs(&self) -> Vec<String> {
        self.try_list_slugs().unwrap_or_else(|e| {
            tracing::warn!("Failed to list posts in {:?}: {}", self.content_dir, e);
            Vec::new()
        })
    }

    /// List the slugs of all post files in ascending order
    pub fn try_list_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .post_files()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.content_dir
            .join(format!("{}.{}", slug, MARKDOWN_EXTENSION))
    }

    /// Find post files directly inside the content directory, sorted by slug
    fn post_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.content_dir.as_path()).to_path_buf();
                ContentError::io(path, io::Error::from(e))
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
                continue;
            };
            if let Err(e) = validate_slug(slug) {
                tracing::warn!("Skipping {:?}: {}", path, e);
                continue;
            }

            files.push((slug.to_string(), path.to_path_buf()));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }

    fn load_meta(&self, slug: String, path: &Path) -> Result<PostMeta> {
        // The file was just listed; vanishing in between is a read failure
        let source = read_source(path)?.ok_or_else(|| {
            ContentError::io(path, io::Error::from(io::ErrorKind::NotFound))
        })?;
        let (meta, _) = self.parse(&slug, path, &source)?;
        Ok(meta)
    }

    /// Split front-matter from body and validate it.
    /// Returns the metadata and the body markdown with the excerpt marker removed.
    fn parse(&self, slug: &str, path: &Path, source: &str) -> Result<(PostMeta, String)> {
        let (mut fm, body) = FrontMatter::parse(source, path)?;
        let (lead, body) = MarkdownRenderer::split_excerpt(body);

        let has_excerpt = fm
            .excerpt
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty());
        if !self.strict && !has_excerpt {
            fm.excerpt = lead;
        }

        let meta = PostMeta::from_front_matter(slug, fm, path, self.strict)?;
        Ok((meta, body))
    }
}

/// Read a post file; `None` if it does not exist
fn read_source(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ContentError::io(path, e)),
    }
}

/// Check if a file is a post file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == MARKDOWN_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "---\ntitle: Hello\ndate: 2024-01-01\nauthor: Ana\nexcerpt: Hi.\ncategory: News\n---\n\nHello world\n";

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("content/blog/hello.md")));
        assert!(!is_markdown_file(Path::new("content/blog/hello.markdown")));
        assert!(!is_markdown_file(Path::new("content/blog/hello.md.bak")));
        assert!(!is_markdown_file(Path::new("content/blog/README")));
    }

    #[test]
    fn test_parse_strips_more_marker() {
        let store = ContentStore::new("unused");
        let source = POST.replace("Hello world\n", "Lead.\n<!-- more -->\nRest.\n");
        let (meta, body) = store.parse("hello", Path::new("hello.md"), &source).unwrap();
        assert_eq!(meta.excerpt, "Hi.");
        assert!(!body.contains("<!-- more -->"));
        assert!(body.contains("Lead.") && body.contains("Rest."));
    }

    #[test]
    fn test_lenient_excerpt_from_more_marker() {
        let store = ContentStore::new("unused").strict(false);
        let source = "---\ntitle: Lead\n---\nFirst paragraph.\n\n<!-- more -->\n\nSecond.";
        let (meta, _) = store.parse("lead", Path::new("lead.md"), source).unwrap();
        assert_eq!(meta.excerpt, "First paragraph.");
        assert_eq!(meta.author, "");
    }

    #[test]
    fn test_post_path_stays_in_directory() {
        let store = ContentStore::new("/srv/content");
        assert_eq!(
            store.post_path("hello"),
            PathBuf::from("/srv/content/hello.md")
        );
    }
}
