//! Remove generated files

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::PostLoader;
use crate::generator::INDEX_FILE;
use crate::Site;

/// Delete post pages, the listing page and the preview fragment
///
/// Sources, the template and the homepage are left alone.
pub fn run(site: &Site) -> Result<()> {
    let posts = PostLoader::new(site).load_posts()?;

    for post in &posts {
        remove_if_exists(&site.output_dir.join(post.output_file_name()))?;
    }
    remove_if_exists(&site.output_dir.join(INDEX_FILE))?;
    remove_if_exists(&site.preview_path)?;

    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
        tracing::info!("Deleted: {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_generated_files_only() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        let source = site.posts_dir.join("2024-01-15-hello.md");
        fs::write(&source, "# Hello").unwrap();
        fs::write(&site.template_path, "{{CONTENT}}").unwrap();
        let other = site.output_dir.join("keep.html");

        let report = site.build().unwrap();
        fs::write(&other, "mine").unwrap();
        run(&site).unwrap();

        assert!(report.pages.iter().all(|p| !p.exists()));
        assert!(!report.index.exists());
        assert!(!site.preview_path.exists());
        assert!(source.exists());
        assert!(site.template_path.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_clean_spares_files_named_by_escaping_slugs() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("2024-01-15-x.md"),
            "---\nslug: ../index\n---\nBody",
        )
        .unwrap();
        fs::write(
            site.posts_dir.join("2024-01-16-y.md"),
            "---\nslug: ../blog-template\n---\nBody",
        )
        .unwrap();
        fs::write(&site.template_path, "<p>{{TITLE}}</p>").unwrap();
        fs::write(&site.homepage_path, "<html>home</html>").unwrap();

        site.build().unwrap();
        assert_eq!(
            fs::read_to_string(&site.homepage_path).unwrap(),
            "<html>home</html>"
        );
        assert!(site.output_dir.join("x.html").exists());

        run(&site).unwrap();

        assert!(site.homepage_path.exists());
        assert!(site.template_path.exists());
        assert!(!site.output_dir.join("x.html").exists());
        assert!(!site.output_dir.join("y.html").exists());
    }
}
