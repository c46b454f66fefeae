//! Build the blog

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::fs;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::PostLoader;
use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Quiet period before a burst of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Load posts and generate every output
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();
    tracing::info!("Building blog...");

    let template = load_template(site)?;

    let loader = PostLoader::new(site);
    let posts = loader.load_posts()?;
    tracing::info!("Found {} blog posts", posts.len());

    let generator = Generator::new(site)?;
    let report = generator.generate(&posts, template.as_deref())?;

    tracing::info!(
        "Blog build complete: {} pages in {:.2}s",
        report.pages.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Read the post template, if there is a usable one
fn load_template(site: &Site) -> Result<Option<String>> {
    if !site.template_path.exists() {
        tracing::info!(
            "Template not found at {:?}, skipping post pages",
            site.template_path
        );
        return Ok(None);
    }

    let template = fs::read_to_string(&site.template_path)
        .with_context(|| format!("Failed to read template {:?}", site.template_path))?;

    if template.is_empty() {
        tracing::info!(
            "Template {:?} is empty, skipping post pages",
            site.template_path
        );
        return Ok(None);
    }

    Ok(Some(template))
}

/// Rebuild whenever a post or the template changes
///
/// Runs until the watcher goes away. A failed rebuild is logged and
/// watching continues.
pub fn watch(site: &Site, inject: bool) -> Result<()> {
    let (tx, rx) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    fs::create_dir_all(&site.posts_dir)?;
    debouncer
        .watcher()
        .watch(&site.posts_dir, RecursiveMode::NonRecursive)?;

    // The template may not exist yet, so watch the directory holding it
    let template_dir = site
        .template_path
        .parent()
        .filter(|p| p.is_dir())
        .unwrap_or(site.base_dir.as_path());
    debouncer
        .watcher()
        .watch(template_dir, RecursiveMode::NonRecursive)?;

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                if !events.iter().any(|e| is_source_change(site, &e.path)) {
                    continue;
                }
                tracing::info!("File changed, rebuilding...");
                if let Err(e) = rebuild(site, inject) {
                    tracing::error!("Build failed: {:#}", e);
                }
            }
            Err(e) => tracing::warn!("Watch error: {}", e),
        }
    }

    Ok(())
}

fn rebuild(site: &Site, inject: bool) -> Result<()> {
    run(site)?;
    if inject {
        super::inject::run(site)?;
    }
    Ok(())
}

/// Only posts and the template feed the build; outputs must not retrigger it
fn is_source_change(site: &Site, path: &Path) -> bool {
    let posts_dir = site
        .posts_dir
        .canonicalize()
        .unwrap_or_else(|_| site.posts_dir.clone());
    if path.starts_with(&posts_dir) || path.starts_with(&site.posts_dir) {
        return path.extension().map(|e| e == "md").unwrap_or(false);
    }
    path.file_name().is_some() && path.file_name() == site.template_path.file_name()
}
