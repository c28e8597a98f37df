//! Render a single post

use anyhow::Result;

use crate::Site;

/// Print a post's rendered HTML, or the whole post as JSON
pub fn run(site: &Site, slug: &str, json: bool) -> Result<()> {
    println!("{}", render(site, slug, json)?);
    Ok(())
}

/// Build the output printed by `run`
pub fn render(site: &Site, slug: &str, json: bool) -> Result<String> {
    let Some(post) = site.store().try_get_by_slug(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if json {
        Ok(serde_json::to_string_pretty(&post)?)
    } else {
        Ok(post.content)
    }
}
