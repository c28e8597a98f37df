//! List site content

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::content::PostMeta;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    print!("{}", render(site, content_type)?);
    Ok(())
}

/// Build the listing printed by `run`
pub fn render(site: &Site, content_type: &str) -> Result<String> {
    let store = site.store();
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let posts = store.try_list_all()?;
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in &posts {
                writeln!(out, "{}", post_line(post))?;
            }
        }
        "slug" | "slugs" => {
            let slugs = store.try_list_slugs()?;
            writeln!(out, "Slugs ({}):", slugs.len())?;
            for slug in slugs {
                writeln!(out, "  {}", slug)?;
            }
        }
        "category" | "categories" => {
            let posts = store.try_list_all()?;
            let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
            for post in &posts {
                *categories.entry(post.category.as_str()).or_insert(0) += 1;
            }
            writeln!(out, "Categories ({}):", categories.len())?;
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (category, count) in categories {
                writeln!(out, "  {} ({})", category, count)?;
            }
        }
        "featured" => {
            let posts: Vec<_> = store
                .try_list_all()?
                .into_iter()
                .filter(|p| p.featured)
                .collect();
            writeln!(out, "Featured posts ({}):", posts.len())?;
            for post in &posts {
                writeln!(out, "{}", post_line(post))?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, slug, category, featured",
                content_type
            );
        }
    }

    Ok(out)
}

fn post_line(post: &PostMeta) -> String {
    format!(
        "  {} - {} [{}] ({}){}",
        post.date,
        post.title,
        post.slug,
        post.category,
        if post.featured { " *" } else { "" }
    )
}
