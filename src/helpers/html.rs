//! HTML helper functions

use super::url::url_for;
use crate::config::SiteConfig;

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate an anchor tag
///
/// Paths already under the site root, such as those from `post_path`, are
/// used unchanged.
///
/// # Examples
/// ```ignore
/// link_to(&config, "/blog/hello/", "Hello") // -> <a href="/blog/hello/">Hello</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    let root = format!("{}/", config.root.trim_end_matches('/'));
    let href = if path.starts_with("http://")
        || path.starts_with("https://")
        || (root != "/" && path.starts_with(&root))
    {
        path.to_string()
    } else {
        url_for(config, path)
    };

    format!(r#"<a href="{}">{}</a>"#, escape_html(&href), escape_html(text))
}

/// Generate a CSS link tag
pub fn css(config: &SiteConfig, path: &str) -> String {
    let path = if path.ends_with(".css") {
        path.to_string()
    } else {
        format!("{}.css", path)
    };
    let href = url_for(config, &format!("static/{}", path.trim_start_matches('/')));

    format!(r#"<link rel="stylesheet" href="{}">"#, escape_html(&href))
}
