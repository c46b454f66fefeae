//! Homepage injection - splices the preview fragment between two marker comments

use anyhow::{Context, Result};
use std::fs;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

use crate::config::MarkerConfig;

/// Whitespace closing the injected region, before the end marker
const TRAILING_INDENT: &str = "\n                ";

/// Marker problems in the injection target
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InjectError {
    #[error(
        "Could not find blog post markers\nAdd these comments around the blog posts section:\n{start}\n{end}"
    )]
    MissingMarkers { start: String, end: String },

    #[error(
        "Blog post markers are out of order: {end} must come after {start}\nAdd these comments around the blog posts section:\n{start}\n{end}"
    )]
    MarkersOutOfOrder { start: String, end: String },
}

/// Replaces the region between a start and an end marker
#[derive(Debug, Clone)]
pub struct Injector {
    start: String,
    end: String,
}

impl Injector {
    /// Create an injector for the given markers
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create an injector from the configured markers
    pub fn from_config(markers: &MarkerConfig) -> Self {
        Self::new(&markers.start, &markers.end)
    }

    /// Byte range between the end of the start marker and the start of the end marker
    pub fn locate(&self, html: &str) -> Result<Range<usize>, InjectError> {
        let (Some(start_pos), Some(_)) = (html.find(&self.start), html.find(&self.end)) else {
            return Err(InjectError::MissingMarkers {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        };

        let region_start = start_pos + self.start.len();
        match html[region_start..].find(&self.end) {
            Some(offset) => Ok(region_start..region_start + offset),
            None => Err(InjectError::MarkersOutOfOrder {
                start: self.start.clone(),
                end: self.end.clone(),
            }),
        }
    }

    /// Put `fragment` between the markers of `html`, keeping both markers
    pub fn splice(&self, html: &str, fragment: &str) -> Result<String, InjectError> {
        let region = self.locate(html)?;
        let mut output = String::with_capacity(html.len() + fragment.len());
        output.push_str(&html[..region.start]);
        output.push('\n');
        output.push_str(fragment);
        output.push_str(TRAILING_INDENT);
        output.push_str(&html[region.end..]);
        Ok(output)
    }

    /// Rewrite `target` in place with the contents of `fragment_path`
    pub fn inject_file(&self, target: &Path, fragment_path: &Path) -> Result<()> {
        let html = fs::read_to_string(target)
            .with_context(|| format!("Failed to read homepage {:?}", target))?;

        // Marker problems are reported before a missing fragment
        self.locate(&html)
            .with_context(|| format!("Cannot update {:?}", target))?;

        let fragment = fs::read_to_string(fragment_path).with_context(|| {
            format!(
                "Failed to read preview {:?}, run `folio build` first",
                fragment_path
            )
        })?;

        let output = self
            .splice(&html, &fragment)
            .with_context(|| format!("Cannot update {:?}", target))?;

        fs::write(target, output).with_context(|| format!("Failed to write {:?}", target))?;
        Ok(())
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::from_config(&MarkerConfig::default())
    }
}
