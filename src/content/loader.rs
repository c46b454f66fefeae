//! Content loader - loads posts from the posts directory

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::config::ValidationMode;
use crate::Site;

lazy_static! {
    static ref DATED_FILENAME: Regex =
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)\.md$").expect("filename pattern is valid");
}

/// Problems found while loading a post
///
/// Reported according to the site's [`ValidationMode`]: logged and
/// recovered from, or returned as the build error in strict mode.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{path:?} does not match the YYYY-MM-DD-<slug>.md pattern")]
    UnrecognizedFilename { path: PathBuf },

    #[error("Invalid front-matter in {path:?}: {message}")]
    InvalidFrontMatter { path: PathBuf, message: String },

    #[error("Slug {slug:?} in the front-matter of {path:?} is not a plain file name")]
    InvalidSlug { path: PathBuf, slug: String },

    #[error("{path:?} is not valid UTF-8, invalid bytes were replaced")]
    InvalidUtf8 { path: PathBuf },

    #[error("Unparseable date {value:?} in the front-matter of {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Slug {slug:?} is used by both {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Loads posts from the posts directory
pub struct PostLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(site.config.markdown.breaks);
        Self { site, renderer }
    }

    /// Load all posts, newest first
    ///
    /// A missing posts directory is created and yields no posts.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.exists() {
            tracing::info!("No posts directory found, creating {:?}", posts_dir);
            fs::create_dir_all(posts_dir)
                .with_context(|| format!("Failed to create {:?}", posts_dir))?;
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        // Sorted enumeration keeps same-day posts in a stable order
        for entry in WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) if self.validation() == ValidationMode::Strict => return Err(e),
                    Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
                }
            }
        }

        self.check_unique_slugs(&posts)?;

        // Stable sort: equal dates keep enumeration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                self.report(LoadError::InvalidUtf8 {
                    path: path.to_path_buf(),
                })?;
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (mut date, mut slug) = match parse_filename(&file_name) {
            Some(parsed) => parsed,
            None => {
                self.report(LoadError::UnrecognizedFilename {
                    path: path.to_path_buf(),
                })?;
                (self.site.today(), fallback_slug(&file_name))
            }
        };

        let (fm, body) = match FrontMatter::parse(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.report(LoadError::InvalidFrontMatter {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                (FrontMatter::default(), text.as_str())
            }
        };

        if let Some(custom) = fm.slug() {
            if is_plain_slug(custom) {
                slug = custom.to_string();
            } else {
                self.report(LoadError::InvalidSlug {
                    path: path.to_path_buf(),
                    slug: custom.to_string(),
                })?;
            }
        }

        if let Some(value) = &fm.date {
            match fm.parse_date() {
                Some(parsed) => date = parsed,
                None => self.report(LoadError::InvalidDate {
                    path: path.to_path_buf(),
                    value: value.clone(),
                })?,
            }
        }

        let mut post = Post::new(slug, date, path.to_path_buf());
        if let Some(title) = fm.title() {
            post.title = title.to_string();
        }
        post.description = fm.description.unwrap_or_default();
        post.categories = fm.categories;
        post.front_matter = fm.raw;
        post.content = self.renderer.render(body);

        tracing::debug!("Loaded {:?} as {} ({})", path, post.slug, post.date);

        Ok(post)
    }

    fn check_unique_slugs(&self, posts: &[Post]) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for (i, post) in posts.iter().enumerate() {
            if !seen.insert(post.slug.as_str()) {
                let first = posts[..i]
                    .iter()
                    .find(|p| p.slug == post.slug)
                    .map(|p| p.source.clone())
                    .unwrap_or_default();
                self.report(LoadError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first,
                    second: post.source.clone(),
                })?;
            }
        }
        Ok(())
    }

    fn validation(&self) -> ValidationMode {
        self.site.config.validation
    }

    /// Log or fail on a problem, per the validation mode
    fn report(&self, problem: LoadError) -> Result<()> {
        match self.validation() {
            ValidationMode::Lenient => {
                tracing::debug!("{}", problem);
                Ok(())
            }
            ValidationMode::Warn => {
                tracing::warn!("{}", problem);
                Ok(())
            }
            ValidationMode::Strict => Err(problem.into()),
        }
    }
}

/// A slug names a file directly inside the output directory
fn is_plain_slug(slug: &str) -> bool {
    !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}

/// Extract the date and slug from a `YYYY-MM-DD-<slug>.md` file name
pub fn parse_filename(file_name: &str) -> Option<(NaiveDate, String)> {
    let caps = DATED_FILENAME.captures(file_name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((date, caps[4].to_string()))
}

/// Slug for a file whose name carries no date
fn fallback_slug(file_name: &str) -> String {
    file_name
        .strip_suffix(".md")
        .unwrap_or(file_name)
        .to_string()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SiteConfig;
    use tempfile::TempDir;

    fn site_with(dir: &TempDir, validation: ValidationMode) -> Site {
        let config = SiteConfig {
            validation,
            ..SiteConfig::default()
        };
        Site::with_config(dir.path(), config).unwrap()
    }

    fn write_post(site: &Site, name: &str, content: &str) {
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(site.posts_dir.join(name), content).unwrap();
    }

    #[test]
    fn test_parse_filename() {
        let (date, slug) = parse_filename("2024-01-15-hello-world.md").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(slug, "hello-world");
    }

    #[test]
    fn test_parse_filename_keeps_whole_trailing_segment() {
        let (date, slug) = parse_filename("1999-12-31-party-like-2024-01-01.md").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        assert_eq!(slug, "party-like-2024-01-01");
    }

    #[test]
    fn test_parse_filename_rejects_non_matching_names() {
        assert!(parse_filename("hello-world.md").is_none());
        assert!(parse_filename("2024-01-15.md").is_none());
        assert!(parse_filename("2024-1-15-short.md").is_none());
        assert!(parse_filename("2024-01-15-hello.markdown").is_none());
    }

    #[test]
    fn test_parse_filename_rejects_impossible_dates() {
        assert!(parse_filename("2024-02-30-leap.md").is_none());
        assert!(parse_filename("2024-13-01-month.md").is_none());
    }

    #[test]
    fn test_missing_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        assert!(!site.posts_dir.exists());

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert!(posts.is_empty());
        assert!(site.posts_dir.is_dir());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "2024-03-01-bare.md", "---\nauthor: Sam\n---\nBody text\n");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.slug, "bare");
        assert_eq!(post.title, "bare");
        assert_eq!(post.description, "");
        assert!(post.categories.is_empty());
        assert_eq!(post.front_matter["author"].as_str(), Some("Sam"));
        assert!(post.content.contains("<p>Body text</p>"));
    }

    #[test]
    fn test_non_markdown_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "2024-03-01-post.md", "---\ntitle: Post\n---\n");
        write_post(&site, "notes.txt", "not a post");
        fs::create_dir_all(site.posts_dir.join("drafts")).unwrap();
        fs::write(
            site.posts_dir.join("drafts/2024-03-02-draft.md"),
            "---\ntitle: Draft\n---\n",
        )
        .unwrap();

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Post");
    }

    #[test]
    fn test_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "2023-05-10-middle.md", "");
        write_post(&site, "2021-01-01-oldest.md", "");
        write_post(&site, "2024-11-30-newest.md", "");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newest", "middle", "oldest"]);
        assert!(posts.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_same_day_posts_keep_file_name_order() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "2024-01-01-b.md", "");
        write_post(&site, "2024-01-01-a.md", "");
        write_post(&site, "2024-01-01-c.md", "");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_undated_file_falls_back_to_today() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "about-me.md", "---\ntitle: About\n---\n");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].slug, "about-me");
        assert_eq!(posts[0].date, site.today());
    }

    #[test]
    fn test_front_matter_overrides_slug_and_date() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(
            &site,
            "2024-01-15-draft-name.md",
            "---\nslug: final-name\ndate: 2024-02-01\n---\n",
        );

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].slug, "final-name");
        assert_eq!(posts[0].title, "final-name");
        assert_eq!(posts[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_malformed_front_matter_is_lenient() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "2024-01-15-broken.md", "---\ntitle: [oops\n---\nBody\n");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].title, "broken");
        assert_eq!(posts[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(posts[0].front_matter.is_empty());
    }

    #[test]
    fn test_warn_mode_still_loads() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Warn);
        write_post(&site, "undated.md", "---\ndate: someday\n---\n");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "undated");
    }

    #[test]
    fn test_strict_mode_rejects_unrecognized_filename() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Strict);
        write_post(&site, "undated.md", "---\ntitle: Undated\n---\n");

        let err = PostLoader::new(&site).load_posts().unwrap_err();
        assert!(err.to_string().contains("undated.md"), "{}", err);
        assert!(err.downcast_ref::<LoadError>().is_some());
    }

    #[test]
    fn test_strict_mode_rejects_malformed_front_matter() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Strict);
        write_post(&site, "2024-01-15-broken.md", "---\ntitle: [oops\n---\n");

        let err = PostLoader::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::InvalidFrontMatter { .. })
        ));
    }

    #[test]
    fn test_strict_mode_rejects_duplicate_slugs() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Strict);
        write_post(&site, "2024-01-15-same.md", "");
        write_post(&site, "2024-02-15-other.md", "---\nslug: same\n---\n");

        let err = PostLoader::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::DuplicateSlug { .. })
        ));
    }

    #[test]
    fn test_slug_override_with_path_keeps_filename_slug() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        write_post(&site, "2024-01-15-x.md", "---\nslug: ../index\n---\nBody");
        write_post(&site, "2024-01-16-y.md", "---\nslug: sub\\\\page\n---\nBody");
        write_post(&site, "2024-01-17-z.md", "---\nslug: ..\n---\nBody");

        let posts = PostLoader::new(&site).load_posts().unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_strict_mode_rejects_slug_with_path() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Strict);
        write_post(&site, "2024-01-15-x.md", "---\nslug: ../blog-template\n---\n");

        let err = PostLoader::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Lenient);
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("2024-01-15-latin.md"),
            b"---\ntitle: Caf\xe9\n---\nCaf\xe9 au lait\n",
        )
        .unwrap();

        let posts = PostLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Caf\u{FFFD}");
        assert!(posts[0].content.contains("au lait"));
    }

    #[test]
    fn test_strict_mode_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let site = site_with(&dir, ValidationMode::Strict);
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(site.posts_dir.join("2024-01-15-latin.md"), b"Caf\xe9").unwrap();

        let err = PostLoader::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::InvalidUtf8 { .. })
        ));
    }
}
