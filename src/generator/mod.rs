//! Generator module - writes post pages, the listing page and the homepage preview

mod page;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Post;
use crate::templates::{CardData, TemplateRenderer};
use crate::Site;

pub use page::{
    render_post_page, CONTENT_PLACEHOLDER, DATE_PLACEHOLDER, DESCRIPTION_PLACEHOLDER,
    TITLE_PLACEHOLDER,
};

/// Name of the listing page inside the output directory
pub const INDEX_FILE: &str = "index.html";

/// Files written by one build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// One page per post, in collection order
    pub pages: Vec<PathBuf>,
    /// The listing page
    pub index: PathBuf,
    /// The preview fragment, unless there were no posts
    pub preview: Option<PathBuf>,
}

/// Static page generator
pub struct Generator<'a> {
    site: &'a Site,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self { site, renderer })
    }

    /// Generate everything for a sorted post collection
    ///
    /// Without a template no post pages are written; the listing page and
    /// the preview are generated either way.
    pub fn generate(&self, posts: &[Post], template: Option<&str>) -> Result<BuildReport> {
        fs::create_dir_all(&self.site.output_dir)
            .with_context(|| format!("Failed to create {:?}", self.site.output_dir))?;

        let mut report = BuildReport::default();

        if let Some(template) = template {
            for post in posts {
                report.pages.push(self.generate_post_page(post, template)?);
            }
        }

        report.index = self.generate_index_page(posts)?;
        report.preview = self.generate_preview(posts)?;

        Ok(report)
    }

    /// Write `<slug>.html` for one post
    pub fn generate_post_page(&self, post: &Post, template: &str) -> Result<PathBuf> {
        let html = render_post_page(post, template);
        let output_path = self.site.output_dir.join(post.output_file_name());
        write_file(&output_path, &html)?;
        tracing::info!("Generated: {}", post.output_file_name());
        Ok(output_path)
    }

    /// Write the listing page with a card for every post
    pub fn generate_index_page(&self, posts: &[Post]) -> Result<PathBuf> {
        let cards = self.cards(posts);
        let html = self
            .renderer
            .render_index(&self.site.config.index, &cards)?;

        let output_path = self.site.output_dir.join(INDEX_FILE);
        write_file(&output_path, &html)?;
        tracing::info!("Generated: {:?}", output_path);
        Ok(output_path)
    }

    /// Write the preview fragment with the most recent posts
    ///
    /// Nothing is written when there are no posts.
    pub fn generate_preview(&self, posts: &[Post]) -> Result<Option<PathBuf>> {
        let count = self.site.config.preview_count.min(posts.len());
        if count == 0 {
            tracing::info!("No posts to generate preview");
            return Ok(None);
        }

        let cards = self.cards(&posts[..count]);
        let html = self.renderer.render_preview(&cards)?;

        let output_path = self.site.preview_path.clone();
        write_file(&output_path, &html)?;
        tracing::info!("Generated: {:?} (for homepage)", output_path);
        Ok(Some(output_path))
    }

    fn cards(&self, posts: &[Post]) -> Vec<CardData> {
        posts
            .iter()
            .map(|p| CardData::from_post(p, &self.site.config.url_prefix))
            .collect()
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}
