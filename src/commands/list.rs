//! List posts

use anyhow::Result;
use serde::Serialize;

use crate::content::{Post, PostLoader};
use crate::helpers::post_href;
use crate::Site;

/// One row of `folio list --json`
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub date: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub href: String,
    pub source: String,
}

impl PostSummary {
    fn new(post: &Post, url_prefix: &str) -> Self {
        Self {
            slug: post.slug.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            title: post.title.clone(),
            description: post.description.clone(),
            categories: post.categories.clone(),
            href: post_href(url_prefix, &post.slug),
            source: post.source.to_string_lossy().to_string(),
        }
    }
}

/// Summaries of every post, newest first
pub fn summaries(site: &Site) -> Result<Vec<PostSummary>> {
    let posts = PostLoader::new(site).load_posts()?;
    Ok(posts
        .iter()
        .map(|p| PostSummary::new(p, &site.config.url_prefix))
        .collect())
}

/// Print the posts as a table or as JSON
pub fn run(site: &Site, json: bool) -> Result<()> {
    let summaries = summaries(site)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Posts ({}):", summaries.len());
    for post in summaries {
        println!("  {} - {} [{}]", post.date, post.title, post.slug);
    }

    Ok(())
}
