//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub categories: Vec<String>,
    /// Overrides the slug taken from the filename
    pub slug: Option<String>,
    /// Overrides the date taken from the filename
    pub date: Option<String>,

    /// The whole metadata block, in source order
    #[serde(skip)]
    pub raw: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a `---` block is returned whole with default
    /// front-matter. A block that is YAML-shaped but fails to parse is an
    /// error; callers decide whether to fall back.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start();
        if !trimmed.starts_with("---") {
            return Ok((FrontMatter::default(), content));
        }

        let rest = trimmed[3..].trim_start_matches([' ', '\t']);
        let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'));
        let Some(rest) = rest else {
            // "----" or "--- text": a rule, not a delimiter
            return Ok((FrontMatter::default(), content));
        };

        let (yaml_content, remaining) = if let Some(body) = rest.strip_prefix("---") {
            ("", body)
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        // Drop the remainder of the closing delimiter line
        let remaining = match remaining.find('\n') {
            Some(pos) if remaining[..pos].trim().is_empty() => &remaining[pos + 1..],
            None if remaining.trim().is_empty() => "",
            _ => remaining,
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        if !has_yaml_structure(yaml_content) {
            // Looks like prose between two horizontal rules
            return Ok((FrontMatter::default(), content));
        }

        let raw: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("Invalid YAML front-matter: {}", e))?;
        let mut fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("Invalid YAML front-matter: {}", e))?;
        fm.raw = raw;

        Ok((fm, remaining))
    }

    /// Parse the date field into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }

    /// The title, unless missing or blank
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// The slug override, unless missing or blank
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Valid YAML front-matter has at least one `key: value` line
fn has_yaml_structure(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 keeps the calendar date as written
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
