//! Post model

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone)]
pub struct Post {
    /// Slug (URL-friendly name, also the output file stem)
    pub slug: String,

    /// Publication date
    pub date: NaiveDate,

    /// Post title
    pub title: String,

    /// Short summary shown on cards and in page metadata
    pub description: String,

    /// Post categories, the first one labels the card
    pub categories: Vec<String>,

    /// Rendered HTML content
    pub content: String,

    /// Every front-matter field as written
    pub front_matter: IndexMap<String, serde_yaml::Value>,

    /// Source file path
    pub source: PathBuf,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: String, date: NaiveDate, source: PathBuf) -> Self {
        Self {
            title: slug.clone(),
            slug,
            date,
            description: String::new(),
            categories: Vec::new(),
            content: String::new(),
            front_matter: IndexMap::new(),
            source,
        }
    }

    /// Name of the generated page
    pub fn output_file_name(&self) -> String {
        format!("{}.html", self.slug)
    }

    /// First category, if any
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}
