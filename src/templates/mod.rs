//! HTML pages for the blog index and post views
//!
//! Deliberately plain markup; styling comes from `static/site.css` when the
//! site provides one.

use crate::config::SiteConfig;
use crate::content::{Post, PostMeta};
use crate::helpers::{blog_index_path, css, display_date, escape_html, link_to, post_path};

/// Renders pages for one site
pub struct TemplateRenderer<'a> {
    config: &'a SiteConfig,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Blog index: featured posts first, then every post newest first
    pub fn index(&self, posts: &[PostMeta]) -> String {
        let mut body = format!("<h1>{}</h1>\n", escape_html(&self.config.title));

        if posts.is_empty() {
            body.push_str("<p class=\"empty\">No posts yet.</p>\n");
            return self.layout(&self.config.title, &body);
        }

        let featured: Vec<_> = posts.iter().filter(|p| p.featured).collect();
        if !featured.is_empty() {
            body.push_str("<section class=\"featured\">\n<h2>Featured</h2>\n");
            for post in featured {
                body.push_str(&self.card(post));
            }
            body.push_str("</section>\n");
        }

        body.push_str("<section class=\"posts\">\n<h2>All posts</h2>\n");
        for post in posts {
            body.push_str(&self.card(post));
        }
        body.push_str("</section>\n");

        self.layout(&self.config.title, &body)
    }

    /// Single post page
    pub fn post(&self, post: &Post) -> String {
        let meta = &post.meta;
        let body = format!(
            "<article class=\"post\">\n<header>\n{}\n<h1>{}</h1>\n<p class=\"excerpt\">{}</p>\n</header>\n<div class=\"post-content\">\n{}</div>\n</article>\n<p>{}</p>\n",
            self.byline(meta),
            escape_html(&meta.title),
            escape_html(&meta.excerpt),
            post.content,
            link_to(self.config, &blog_index_path(self.config), "All posts"),
        );

        self.layout(&meta.title, &body)
    }

    /// Page shown for unknown or unloadable slugs
    pub fn not_found(&self) -> String {
        let body = format!(
            "<h1>Post not found</h1>\n<p>The post you are looking for does not exist.</p>\n<p>{}</p>\n",
            link_to(self.config, &blog_index_path(self.config), "Back to the blog"),
        );
        self.layout("Not found", &body)
    }

    fn card(&self, post: &PostMeta) -> String {
        format!(
            "<article class=\"post-card\">\n{}\n<h3>{}</h3>\n<p>{}</p>\n</article>\n",
            self.byline(post),
            link_to(self.config, &post_path(self.config, &post.slug), &post.title),
            escape_html(&post.excerpt),
        )
    }

    /// "Category • Date • By Author"
    fn byline(&self, post: &PostMeta) -> String {
        format!(
            "<div class=\"meta\">{} &bull; <time datetime=\"{}\">{}</time> &bull; By {}</div>",
            escape_html(&post.category),
            escape_html(&post.date),
            escape_html(&display_date(&post.date)),
            escape_html(&post.author),
        )
    }

    fn layout(&self, title: &str, body: &str) -> String {
        let page_title = if title == self.config.title {
            escape_html(title)
        } else {
            format!(
                "{} | {}",
                escape_html(title),
                escape_html(&self.config.title)
            )
        };

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n<meta name=\"description\" content=\"{}\">\n{}\n</head>\n<body>\n<main class=\"page-wrapper\">\n{}</main>\n</body>\n</html>\n",
            page_title,
            escape_html(&self.config.description),
            css(self.config, "site"),
            body
        )
    }
}
