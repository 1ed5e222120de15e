//! Build-time validation
//!
//! Walks the posts directory and reports every problem instead of stopping
//! at the first one. Malformed metadata is an error; an empty body is only
//! a warning, since placeholder drafts are legitimate.

use anyhow::Result;
use std::fmt;
use std::fs;
use walkdir::WalkDir;

use super::frontmatter::FrontMatter;
use crate::Blog;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One finding about one post file
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Source path relative to the source directory
    pub source: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.source, self.message)
    }
}

/// Validate every post file under `<source_dir>/_posts`.
///
/// Diagnostics come back in sorted file-name order.
pub fn check_posts(blog: &Blog) -> Result<Vec<Diagnostic>> {
    let posts_dir = blog.source_dir.join("_posts");
    let mut diagnostics = Vec::new();

    if !posts_dir.exists() {
        return Ok(diagnostics);
    }

    let tz = blog.config.timezone();

    for entry in WalkDir::new(&posts_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !super::loader::is_markdown_file(path) {
            continue;
        }

        let source = path
            .strip_prefix(&blog.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    source,
                    message: format!("unreadable file: {}", e),
                });
                continue;
            }
        };

        let (fm, body) = match FrontMatter::parse(&content) {
            Ok(parsed) => parsed,
            Err(e) => {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    source,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let mut malformed = false;
        if let Err(e) = fm.require_title() {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                source: source.clone(),
                message: e.to_string(),
            });
            malformed = true;
        }
        if let Err(e) = fm.resolve_date(tz) {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                source: source.clone(),
                message: e.to_string(),
            });
            malformed = true;
        }
        if let Err(e) = fm.resolve_updated(tz) {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                source: source.clone(),
                message: format!("in `updated`: {}", e),
            });
            malformed = true;
        }

        if !malformed && body.trim().is_empty() {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                source,
                message: "post has a metadata block but no content".to_string(),
            });
        }
    }

    Ok(diagnostics)
}

/// Whether any diagnostic is error-severity
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}
