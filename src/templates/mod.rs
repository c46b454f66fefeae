//! Built-in listing page and preview templates using the Tera template engine
//!
//! The templates are embedded in the binary. Both the listing page and the
//! homepage preview render their cards through the `card` macro in
//! `macros.html`, so the two always share one markup.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::IndexPageConfig;
use crate::content::Post;
use crate::helpers::{long_date, post_href};

/// Label of a card whose post has no category
pub const DEFAULT_CATEGORY: &str = "Article";

/// Card text of a post without a description
pub const DEFAULT_DESCRIPTION: &str = "Read more...";

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post content and descriptions are already HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("macros.html", include_str!("site/macros.html")),
            ("index.html", include_str!("site/index.html")),
            ("preview.html", include_str!("site/preview.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the full listing page
    pub fn render_index(&self, page: &IndexPageConfig, cards: &[CardData]) -> Result<String> {
        let mut context = Context::new();
        context.insert("page", page);
        context.insert("posts", cards);
        self.render("index.html", &context)
    }

    /// Render the bare preview fragment
    pub fn render_preview(&self, cards: &[CardData]) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", cards);
        self.render("preview.html", &context)
    }
}

/// What a card shows about one post
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
}

impl CardData {
    /// Build the card of a post, linking under `url_prefix`
    pub fn from_post(post: &Post, url_prefix: &str) -> Self {
        let description = if post.description.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            post.description.clone()
        };

        Self {
            slug: post.slug.clone(),
            href: post_href(url_prefix, &post.slug),
            title: post.title.clone(),
            description,
            category: post
                .primary_category()
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            date: long_date(&post.date),
        }
    }
}
