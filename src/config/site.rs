//! Site configuration (folio.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directories and files, relative to the base directory
    pub posts_dir: String,
    pub output_dir: String,
    pub template: String,
    pub preview: String,
    pub homepage: String,

    // URL prefix of post pages, as seen from the site root
    pub url_prefix: String,

    // Number of cards in the homepage preview
    pub preview_count: usize,

    // How filename and front-matter problems are reported
    pub validation: ValidationMode,

    // IANA timezone used for "today" when a post has no date
    pub timezone: Option<String>,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub index: IndexPageConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_dir: "blog/_posts".to_string(),
            output_dir: "blog".to_string(),
            template: "blog-template.html".to_string(),
            preview: "blog-preview.html".to_string(),
            homepage: "index.html".to_string(),
            url_prefix: "/blog/".to_string(),
            preview_count: 3,
            validation: ValidationMode::default(),
            timezone: None,
            markdown: MarkdownConfig::default(),
            markers: MarkerConfig::default(),
            index: IndexPageConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// What to do when a post's filename or front-matter cannot be understood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Fall back to defaults without a word
    #[default]
    Lenient,
    /// Fall back to defaults and log a warning
    Warn,
    /// Fail the build
    Strict,
}

/// Markdown rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Render single line breaks inside paragraphs as `<br />`
    pub breaks: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { breaks: true }
    }
}

/// Comments delimiting the homepage region that receives the preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub start: String,
    pub end: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start: "<!-- BLOG_POSTS_START -->".to_string(),
            end: "<!-- BLOG_POSTS_END -->".to_string(),
        }
    }
}

/// A navigation or footer link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Highlighted as the current section
    #[serde(default)]
    pub active: bool,
    /// Opened in a new tab
    #[serde(default)]
    pub external: bool,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            active: false,
            external: false,
        }
    }
}

/// Texts and links of the listing page scaffolding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexPageConfig {
    pub title: String,
    pub site_name: String,
    pub description: String,
    pub eyebrow: String,
    pub heading: String,
    pub tagline: String,
    pub home_href: String,
    pub favicon: String,
    pub stylesheet: String,
    pub fonts: Option<String>,
    pub nav: Vec<NavLink>,
    pub footer_links: Vec<NavLink>,
    pub footer_note: String,
}

impl Default for IndexPageConfig {
    fn default() -> Self {
        Self {
            title: "Writing".to_string(),
            site_name: "My Portfolio".to_string(),
            description: "Notes on technology, product leadership and technical architecture"
                .to_string(),
            eyebrow: "Writing & Insights".to_string(),
            heading: "Blog".to_string(),
            tagline: "Thoughts on technology, product leadership, and building great teams"
                .to_string(),
            home_href: "/".to_string(),
            favicon: "/favicon.svg".to_string(),
            stylesheet: "/src/style.css".to_string(),
            fonts: Some(
                "https://fonts.googleapis.com/css2?family=Crimson+Pro:wght@300;400;600;700&family=DM+Sans:wght@400;500;700&display=swap"
                    .to_string(),
            ),
            nav: vec![
                NavLink::new("About", "/#about"),
                NavLink::new("Experience", "/#experience"),
                NavLink {
                    active: true,
                    ..NavLink::new("Blog", "/blog/")
                },
                NavLink::new("Contact", "/#contact"),
            ],
            footer_links: Vec::new(),
            footer_note: String::new(),
        }
    }
}
