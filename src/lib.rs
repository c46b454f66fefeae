//! folio: a small static blog generator for a portfolio site
//!
//! Markdown posts are rendered into standalone pages through an HTML
//! template, collected into a listing page, and summarized in a preview
//! fragment that can be spliced into the site's homepage.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod inject;
pub mod templates;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub use config::{SiteConfig, ValidationMode};
pub use generator::BuildReport;

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "folio.yml";

/// A site rooted at a base directory, with every path resolved up front
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the Markdown posts
    pub posts_dir: PathBuf,
    /// Directory receiving post pages and the listing page
    pub output_dir: PathBuf,
    /// HTML template for post pages
    pub template_path: PathBuf,
    /// Preview fragment written for the homepage
    pub preview_path: PathBuf,
    /// Homepage that receives the preview fragment
    pub homepage_path: PathBuf,
    timezone: Option<chrono_tz::Tz>,
}

impl Site {
    /// Create a site from a directory, reading `folio.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)
                .with_context(|| format!("Failed to load {:?}", config_path))?
        } else {
            SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create a site from a directory and an already-built configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let timezone = match config.timezone.as_deref().map(str::trim) {
            Some(tz) if !tz.is_empty() => Some(
                tz.parse::<chrono_tz::Tz>()
                    .map_err(|e| anyhow!("Invalid timezone {:?}: {}", tz, e))?,
            ),
            _ => None,
        };

        Ok(Self {
            posts_dir: base_dir.join(&config.posts_dir),
            output_dir: base_dir.join(&config.output_dir),
            template_path: base_dir.join(&config.template),
            preview_path: base_dir.join(&config.preview),
            homepage_path: base_dir.join(&config.homepage),
            base_dir,
            config,
            timezone,
        })
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> NaiveDate {
        helpers::today(self.timezone)
    }

    /// Build every page, the listing page and the preview fragment
    pub fn build(&self) -> Result<BuildReport> {
        commands::build::run(self)
    }

    /// Splice the preview fragment into the homepage
    pub fn inject(&self) -> Result<()> {
        commands::inject::run(self)
    }

    /// Scaffold a new post in the posts directory
    pub fn new_post(&self, title: &str, options: &commands::new::NewPostOptions) -> Result<PathBuf> {
        commands::new::create_post(self, title, options)
    }

    /// Remove generated artifacts
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
