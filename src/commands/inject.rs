//! Splice the latest preview into the homepage

use anyhow::Result;

use crate::inject::Injector;
use crate::Site;

/// Update the homepage between its blog post markers
pub fn run(site: &Site) -> Result<()> {
    let injector = Injector::from_config(&site.config.markers);
    injector.inject_file(&site.homepage_path, &site.preview_path)?;
    tracing::info!(
        "Updated {:?} with latest blog posts",
        site.homepage_path
    );
    Ok(())
}
