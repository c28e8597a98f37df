//! Validate every post in the content directory

use anyhow::Result;
use std::fmt::Write;

use crate::content::Scan;
use crate::helpers::is_iso_date;
use crate::Site;

/// Report malformed posts; fails if any post does not load
pub fn run(site: &Site) -> Result<()> {
    let scan = site.store().scan()?;
    print!("{}", report(&scan)?);

    if !scan.failures.is_empty() {
        anyhow::bail!("{} post(s) failed to load", scan.failures.len());
    }
    Ok(())
}

/// Human-readable summary of a scan
pub fn report(scan: &Scan) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "Checked {} post(s): {} ok, {} failed",
        scan.posts.len() + scan.failures.len(),
        scan.posts.len(),
        scan.failures.len()
    )?;

    for (slug, error) in &scan.failures {
        writeln!(out, "  error  {}: {}", slug, error)?;
    }

    for post in scan.posts.iter().filter(|p| !is_iso_date(&p.date)) {
        writeln!(
            out,
            "  warn   {}: date {:?} is not ISO-8601 and may sort out of order",
            post.slug, post.date
        )?;
    }

    Ok(out)
}
