//! Content loader - reads the post collection from the source directory

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Post, PostStore};
use crate::Blog;

/// Loads posts from `<source_dir>/_posts`
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    tz: Option<Tz>,
}

impl<'a> ContentLoader<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        let tz = blog.config.timezone();
        Self { blog, tz }
    }

    /// Load every post, sorted by date descending.
    ///
    /// Enumeration is in sorted file-name order, and the date sort is
    /// stable, so posts sharing a date keep their listing order and
    /// repeated loads of unchanged files yield the same sequence.
    /// A malformed post fails the whole load; the author has to fix it.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.blog.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                let post = self
                    .load_post(path)
                    .with_context(|| format!("failed to load post {:?}", path))?;
                if post.published || self.blog.config.render_drafts {
                    posts.push(post);
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load all posts and index them into a store
    pub fn load_store(&self) -> Result<PostStore> {
        Ok(PostStore::from_posts(self.load_posts()?))
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;

        let source = path
            .strip_prefix(&self.blog.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::parse(&content, source, self.tz)?;
        post.full_source = path.to_path_buf();

        if post.body.trim().is_empty() {
            tracing::warn!("Post {:?} has an empty body", path);
        }

        post.categories = self.apply_map(post.categories, &self.blog.config.category_map);
        post.tags = self.apply_map(post.tags, &self.blog.config.tag_map);

        Ok(post)
    }

    fn apply_map(
        &self,
        names: Vec<String>,
        map: &std::collections::HashMap<String, String>,
    ) -> Vec<String> {
        names
            .into_iter()
            .map(|n| map.get(&n).cloned().unwrap_or(n))
            .collect()
    }
}

/// Check if a file is a markdown file
pub(crate) fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn blog_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_load_sorted_by_date_descending() {
        let (_dir, blog) = blog_with_posts(&[
            (
                "old.md",
                "---\ntitle: Old\ndate: 2019-06-15T00:00:00+00:00\n---\n\nOld body.\n",
            ),
            (
                "new.md",
                "---\ntitle: New\ndate: 2021-01-01T00:00:00+00:00\n---\n\nNew body.\n",
            ),
            (
                "middle.md",
                "---\ntitle: Middle\ndate: 2020-03-03T00:00:00+00:00\n---\n\nMiddle body.\n",
            ),
        ]);

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }

    #[test]
    fn test_date_ties_keep_listing_order() {
        let same = "---\ntitle: %T\ndate: 2020-05-05T10:00:00+00:00\n---\n\nBody.\n";
        let second = same.replace("%T", "Second");
        let first = same.replace("%T", "First");
        let third = same.replace("%T", "Third");
        let (_dir, blog) = blog_with_posts(&[
            ("b-second.md", second.as_str()),
            ("a-first.md", first.as_str()),
            ("c-third.md", third.as_str()),
        ]);

        let loader = ContentLoader::new(&blog);
        let posts = loader.load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        // File-name enumeration order survives the stable date sort
        assert_eq!(titles, vec!["First", "Second", "Third"]);

        // Restartable: a second pass over the same files gives the same order
        let again: Vec<_> = loader
            .load_posts()
            .unwrap()
            .iter()
            .map(|p| p.title.clone())
            .collect();
        assert_eq!(again, titles);
    }

    #[test]
    fn test_malformed_post_fails_the_load() {
        let (_dir, blog) = blog_with_posts(&[(
            "broken.md",
            "---\ndate: 2020-01-01\n---\n\nNo title here.\n",
        )]);

        let err = ContentLoader::new(&blog).load_posts().unwrap_err();
        assert!(format!("{:#}", err).contains("missing required field `title`"));
    }

    #[test]
    fn test_drafts_skipped_unless_configured() {
        let (_dir, mut blog) = blog_with_posts(&[
            (
                "live.md",
                "---\ntitle: Live\ndate: 2020-01-02\n---\n\nBody.\n",
            ),
            (
                "wip.md",
                "---\ntitle: Wip\ndate: 2020-01-01\npublished: false\n---\n\nBody.\n",
            ),
        ]);

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Live");

        blog.config.render_drafts = true;
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_empty_body_still_loads() {
        let (_dir, blog) = blog_with_posts(&[(
            "placeholder.md",
            "---\ntitle: Placeholder\ndate: 2020-01-01\n---\n",
        )]);

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].body.trim().is_empty());
    }

    #[test]
    fn test_category_map_applied() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("source/_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "category_map:\n  zf: zend\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("p.md"),
            "---\ntitle: P\ndate: 2020-01-01\ncategories: zf\n---\n\nBody.\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts[0].categories, vec!["zend"]);
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let (_dir, blog) = blog_with_posts(&[
            ("post.md", "---\ntitle: P\ndate: 2020-01-01\n---\n\nBody.\n"),
            ("notes.txt", "not a post"),
        ]);

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
    }
}
