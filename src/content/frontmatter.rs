//! Front-matter parsing
//!
//! Every post starts with a delimited metadata block: YAML between `---`
//! fences, or JSON between `;;;` fences (a bare JSON object also works).
//! The block must be the very first thing in the file.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Reasons a metadata block is rejected at build time
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("post has no metadata block")]
    MissingBlock,

    #[error("metadata block is not terminated")]
    UnterminatedBlock,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("invalid YAML metadata: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON metadata: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Accept either a single string or a list of strings for tags/categories
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::One(s)) => Ok(vec![s]),
        Some(OneOrMany::Many(v)) => Ok(v),
    }
}

/// Raw front-matter data as written in a post file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    #[serde(deserialize_with = "one_or_many", default)]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "one_or_many", default)]
    pub categories: Vec<String>,
    /// Posts are published unless explicitly marked otherwise
    #[serde(default = "default_published")]
    pub published: bool,

    /// Unknown fields are kept so amended posts never lose them
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            updated: None,
            tags: Vec::new(),
            categories: Vec::new(),
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Split the leading metadata block from the body.
    ///
    /// Returns the parsed front matter and the remaining body text.
    pub fn parse(content: &str) -> Result<(Self, &str), MetadataError> {
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }
        Err(MetadataError::MissingBlock)
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), MetadataError> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let end_pos = rest.find("\n---").ok_or(MetadataError::UnterminatedBlock)?;
        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Err(MetadataError::MissingField("title"));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), MetadataError> {
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest.find(";;;").ok_or(MetadataError::UnterminatedBlock)?;
            let fm: FrontMatter = serde_json::from_str(&rest[..end_pos])?;
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
            return Ok((fm, remaining));
        }

        // Bare JSON object: find the matching closing brace
        let mut depth = 0;
        let mut end_pos = 0;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end_pos == 0 {
            return Err(MetadataError::UnterminatedBlock);
        }

        let fm: FrontMatter = serde_json::from_str(&content[..end_pos])?;
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
        Ok((fm, remaining))
    }

    /// The required `title` field
    pub fn require_title(&self) -> Result<&str, MetadataError> {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => Ok(t),
            _ => Err(MetadataError::MissingField("title")),
        }
    }

    /// The required `date` field, resolved to a timestamp with offset
    pub fn resolve_date(&self, tz: Option<Tz>) -> Result<DateTime<FixedOffset>, MetadataError> {
        let raw = self
            .date
            .as_deref()
            .ok_or(MetadataError::MissingField("date"))?;
        parse_date_string(raw, tz).ok_or_else(|| MetadataError::InvalidDate(raw.to_string()))
    }

    /// Optional `updated` field; an unparseable value is still an error
    pub fn resolve_updated(
        &self,
        tz: Option<Tz>,
    ) -> Result<Option<DateTime<FixedOffset>>, MetadataError> {
        match self.updated.as_deref() {
            None => Ok(None),
            Some(raw) => parse_date_string(raw, tz)
                .map(Some)
                .ok_or_else(|| MetadataError::InvalidDate(raw.to_string())),
        }
    }
}

/// Parse a date string in the accepted formats.
///
/// Values carrying an explicit UTC offset keep it; naive values are resolved
/// in `tz` when given, otherwise in the local timezone.
pub fn parse_date_string(s: &str, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let naive_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return resolve_naive(dt, tz);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return resolve_naive(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

fn resolve_naive(dt: NaiveDateTime, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
    match tz {
        Some(tz) => tz
            .from_local_datetime(&dt)
            .earliest()
            .map(|d| d.fixed_offset()),
        None => Local
            .from_local_datetime(&dt)
            .earliest()
            .map(|d| d.fixed_offset()),
    }
}
