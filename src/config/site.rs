//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// IANA timezone name used to resolve naive front-matter dates
    pub timezone: String,

    // URL
    pub url: String,

    // Directory
    pub source_dir: String,

    // Writing
    pub new_post_name: String,
    pub render_drafts: bool,

    // Category & Tag renames
    #[serde(default)]
    pub category_map: HashMap<String, String>,
    #[serde(default)]
    pub tag_map: HashMap<String, String>,

    // Date format for listings (Moment.js style)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "A Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "http://example.com".to_string(),

            source_dir: "source".to_string(),

            new_post_name: ":title.md".to_string(),
            render_drafts: false,

            category_map: HashMap::new(),
            tag_map: HashMap::new(),

            date_format: "YYYY-MM-DD".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The configured timezone, if set and valid
    pub fn timezone(&self) -> Option<chrono_tz::Tz> {
        if self.timezone.is_empty() {
            return None;
        }
        match self.timezone.parse() {
            Ok(tz) => Some(tz),
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, using local offset", self.timezone);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.source_dir, "source");
        assert_eq!(config.new_post_name, ":title.md");
        assert!(!config.render_drafts);
        assert!(config.timezone().is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
timezone: Asia/Tokyo
render_drafts: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert!(config.render_drafts);
        assert_eq!(config.timezone(), Some(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = SiteConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(config.timezone().is_none());
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let yaml = "title: T\ntheme: landscape\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("theme"));
    }
}
