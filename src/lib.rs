//! blogstore: a front-matter post record store
//!
//! This crate holds the written content of a markdown blog as a queryable,
//! validated collection. It parses each post's metadata block, orders the
//! collection by date, and indexes it by category and tag, so an external
//! static-site generator can consume clean inputs.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

use content::loader::ContentLoader;
use content::validate::{self, Diagnostic};
use content::PostStore;

/// The blog rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory (posts live in `<source_dir>/_posts`)
    pub source_dir: std::path::PathBuf,
}

impl Blog {
    /// Open a blog from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
        })
    }

    /// Load and index every post
    pub fn load(&self) -> Result<PostStore> {
        ContentLoader::new(self).load_store()
    }

    /// Run build-time validation over the posts directory
    pub fn check(&self) -> Result<Vec<Diagnostic>> {
        validate::check_posts(self)
    }

    /// Create a new post from the scaffold
    pub fn new_post(&self, title: &str, layout: Option<&str>) -> Result<()> {
        commands::new::create_post(self, title, layout.unwrap_or("post"), None)
    }
}
