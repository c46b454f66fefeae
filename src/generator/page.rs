//! Post page rendering through the site's HTML template

use crate::content::Post;
use crate::helpers::long_date;

/// Replaced everywhere in the template
pub const TITLE_PLACEHOLDER: &str = "{{TITLE}}";
/// Replaced everywhere in the template
pub const DATE_PLACEHOLDER: &str = "{{DATE}}";
/// Only the first occurrence is replaced
pub const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";
/// Only the first occurrence is replaced
pub const DESCRIPTION_PLACEHOLDER: &str = "{{DESCRIPTION}}";

/// Fill the template with one post
///
/// Title and date fill every placeholder; content and description fill
/// only the first one, later copies stay in the output as written.
pub fn render_post_page(post: &Post, template: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, &post.title)
        .replace(DATE_PLACEHOLDER, &long_date(&post.date))
        .replacen(CONTENT_PLACEHOLDER, &post.content, 1)
        .replacen(DESCRIPTION_PLACEHOLDER, &post.description, 1)
}
