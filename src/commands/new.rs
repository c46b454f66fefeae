//! Create a new post

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Optional fields of a new post
#[derive(Debug, Clone, Default)]
pub struct NewPostOptions {
    pub description: Option<String>,
    pub category: Option<String>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// Front-matter written into a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<&'a str>,
}

/// Write `YYYY-MM-DD-<slug>.md` with a front-matter block into the posts directory
pub fn create_post(site: &Site, title: &str, options: &NewPostOptions) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let date = options.date.unwrap_or_else(|| site.today());
    let file_path = site
        .posts_dir
        .join(format!("{}-{}.md", date.format("%Y-%m-%d"), slug));

    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        description: options.description.as_deref().unwrap_or(""),
        categories: options.category.as_deref().into_iter().collect(),
    };
    let front_matter = serde_yaml::to_string(&scaffold)?;
    let content = format!("---\n{}---\n\n", front_matter);

    fs::create_dir_all(&site.posts_dir)
        .with_context(|| format!("Failed to create {:?}", site.posts_dir))?;
    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
