//! Post model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use super::frontmatter::{FrontMatter, MetadataError};

/// A blog post: one metadata block followed by a verbatim body
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date, always carrying a UTC offset
    pub date: DateTime<FixedOffset>,

    /// Last updated date
    pub updated: Option<DateTime<FixedOffset>>,

    /// Body text exactly as authored (markdown, fenced code, links)
    pub body: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Post categories
    pub categories: Vec<String>,

    /// Source file path relative to the source directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL-friendly name derived from the file stem
    pub slug: String,

    /// Whether the post is published (drafts are skipped by default)
    pub published: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Render the post back to its file form.
    ///
    /// Parsing the result reproduces the same metadata fields, so the
    /// collection can be rewritten without losing information.
    pub fn render(&self) -> String {
        use serde_yaml::{Mapping, Value};

        let mut map = Mapping::new();
        map.insert(
            Value::String("title".into()),
            Value::String(self.title.clone()),
        );
        map.insert(
            Value::String("date".into()),
            Value::String(self.date.to_rfc3339()),
        );
        if let Some(updated) = self.updated {
            map.insert(
                Value::String("updated".into()),
                Value::String(updated.to_rfc3339()),
            );
        }
        if !self.tags.is_empty() {
            map.insert(
                Value::String("tags".into()),
                Value::Sequence(self.tags.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.categories.is_empty() {
            map.insert(
                Value::String("categories".into()),
                Value::Sequence(self.categories.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.published {
            map.insert(Value::String("published".into()), Value::Bool(false));
        }
        for (key, value) in &self.extra {
            map.insert(Value::String(key.clone()), value.clone());
        }

        // A mapping of plain scalars always serializes
        let yaml = serde_yaml::to_string(&map).unwrap_or_default();
        format!("---\n{}---\n\n{}", yaml, self.body)
    }

    /// Parse a raw document into a post.
    ///
    /// This is the strict form of the loader's per-file step: required
    /// fields missing means the whole document is rejected.
    pub fn parse(
        raw: &str,
        source: String,
        tz: Option<chrono_tz::Tz>,
    ) -> Result<Post, MetadataError> {
        let (fm, body) = FrontMatter::parse(raw)?;
        let title = fm.require_title()?.to_string();
        let date = fm.resolve_date(tz)?;
        let updated = fm.resolve_updated(tz)?;

        let slug = PathBuf::from(&source)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| slug::slugify(s))
            .unwrap_or_default();

        Ok(Post {
            title,
            date,
            updated,
            body: body.to_string(),
            tags: fm.tags,
            categories: fm.categories,
            full_source: PathBuf::from(&source),
            source,
            slug,
            published: fm.published,
            extra: fm.extra,
        })
    }
}

/// A category with its post count
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

impl Category {
    pub fn new(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            count,
        }
    }
}

/// A tag with its post count
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

impl Tag {
    pub fn new(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let raw = "---\ntitle: Example\ndate: 2019-06-15T00:00:00+00:00\ncategories:\n  - zend\n  - testing\n---\n\nNon-empty body.\n";
        let post = Post::parse(raw, "example.md".to_string(), None).unwrap();
        assert_eq!(post.title, "Example");
        assert_eq!(post.categories, vec!["zend", "testing"]);
        assert_eq!(post.slug, "example");
        assert!(post.published);
        assert_eq!(post.body, "Non-empty body.\n");
    }

    #[test]
    fn test_render_parse_round_trip() {
        let raw = "---\ntitle: Round Trip\ndate: 2021-03-04T12:30:00+09:00\nupdated: 2021-03-05T08:00:00+09:00\ntags:\n  - testing\ncategories:\n  - zend\n---\n\nBody with a [link](https://example.com) and code:\n\n```php\n$x = 1;\n```\n";
        let post = Post::parse(raw, "round-trip.md".to_string(), None).unwrap();

        let rendered = post.render();
        let reparsed = Post::parse(&rendered, post.source.clone(), None).unwrap();

        assert_eq!(reparsed.title, post.title);
        assert_eq!(reparsed.date, post.date);
        assert_eq!(
            reparsed.date.offset().local_minus_utc(),
            post.date.offset().local_minus_utc()
        );
        assert_eq!(reparsed.updated, post.updated);
        assert_eq!(reparsed.tags, post.tags);
        assert_eq!(reparsed.categories, post.categories);
        assert_eq!(reparsed.body, post.body);
        assert_eq!(reparsed.published, post.published);
    }

    #[test]
    fn test_render_skips_empty_collections() {
        let raw = "---\ntitle: Plain\ndate: 2020-01-01\n---\n\nHello.\n";
        let post = Post::parse(raw, "plain.md".to_string(), None).unwrap();
        let rendered = post.render();
        assert!(!rendered.contains("tags:"));
        assert!(!rendered.contains("categories:"));
        assert!(!rendered.contains("published:"));
    }

    #[test]
    fn test_draft_round_trip() {
        let raw = "---\ntitle: Draft\ndate: 2020-01-01\npublished: false\n---\n\nWip.\n";
        let post = Post::parse(raw, "draft.md".to_string(), None).unwrap();
        assert!(!post.published);
        let reparsed = Post::parse(&post.render(), post.source.clone(), None).unwrap();
        assert!(!reparsed.published);
    }
}
