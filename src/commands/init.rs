//! Initialize a new blog directory

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("source/_drafts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    let config_content = r#"# Site
title: A Blog
description: ''
author: John Doe
language: en
timezone: ''

# URL
url: http://example.com

# Directory
source_dir: source

# Writing
new_post_name: :title.md
render_drafts: false

# Category & Tag renames
category_map:
tag_map:

# Date format for listings
date_format: YYYY-MM-DD
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    let post_scaffold = r#"---
title: {{ title }}
date: {{ date }}
categories:
---
"#;

    let draft_scaffold = r#"---
title: {{ title }}
categories:
published: false
---
"#;

    fs::write(target_dir.join("scaffolds/post.md"), post_scaffold)?;
    fs::write(target_dir.join("scaffolds/draft.md"), draft_scaffold)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
categories:
  - meta
---

This is the first post in a fresh blog. Replace it with your own writing.

Posts live under `source/_posts`, one markdown file each, starting with a
metadata block:

```yaml
---
title: My Post
date: {}
categories:
  - example
---
```

Run `blogstore check` before publishing to catch posts with missing or
malformed metadata.
"#,
        now.format("%Y-%m-%d %H:%M:%S"),
        now.format("%Y-%m-%d %H:%M:%S"),
    );

    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;

    #[test]
    fn test_init_creates_a_loadable_blog() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("scaffolds/post.md").exists());

        let blog = Blog::new(dir.path()).unwrap();
        let store = blog.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.posts()[0].title, "Hello World");
        assert_eq!(store.posts_in_category("meta").len(), 1);
    }
}
