//! Post record store
//!
//! Holds the ordered post collection plus category and tag indexes. Index
//! keys are recorded in first-appearance order over the date-sorted list,
//! so two loads of the same files produce identical iteration order.

use indexmap::IndexMap;

use super::{Category, Post, Tag};

/// The ordered, indexed post collection
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    categories: IndexMap<String, Vec<usize>>,
    tags: IndexMap<String, Vec<usize>>,
}

impl PostStore {
    /// Build a store from posts already sorted by date descending
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let mut categories: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut tags: IndexMap<String, Vec<usize>> = IndexMap::new();

        for (idx, post) in posts.iter().enumerate() {
            for name in &post.categories {
                if name.trim().is_empty() {
                    continue;
                }
                categories.entry(name.clone()).or_default().push(idx);
            }
            for name in &post.tags {
                if name.trim().is_empty() {
                    continue;
                }
                tags.entry(name.clone()).or_default().push(idx);
            }
        }

        Self {
            posts,
            categories,
            tags,
        }
    }

    /// All posts, date descending
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts listed under a category, date descending
    pub fn posts_in_category(&self, name: &str) -> Vec<&Post> {
        self.categories
            .get(name)
            .map(|ids| ids.iter().map(|&i| &self.posts[i]).collect())
            .unwrap_or_default()
    }

    /// Posts carrying a tag, date descending
    pub fn posts_with_tag(&self, name: &str) -> Vec<&Post> {
        self.tags
            .get(name)
            .map(|ids| ids.iter().map(|&i| &self.posts[i]).collect())
            .unwrap_or_default()
    }

    /// Category summaries in first-appearance order
    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .map(|(name, ids)| Category::new(name, ids.len()))
            .collect()
    }

    /// Tag summaries in first-appearance order
    pub fn tags(&self) -> Vec<Tag> {
        self.tags
            .iter()
            .map(|(name, ids)| Tag::new(name, ids.len()))
            .collect()
    }
}
