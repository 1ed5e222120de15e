//! List store contents

use anyhow::Result;

use crate::helpers::format_date;
use crate::Blog;

/// List store contents by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let store = blog.load()?;
    let date_format = &blog.config.date_format;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", store.len());
            for post in store.posts() {
                println!(
                    "  {} - {} [{}]",
                    format_date(&post.date, date_format),
                    post.title,
                    post.source
                );
            }
        }
        "category" | "categories" => {
            let mut categories = store.categories();
            categories.sort_by(|a, b| b.count.cmp(&a.count));
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({})", category.name, category.count);
            }
        }
        "tag" | "tags" => {
            let mut tags = store.tags();
            tags.sort_by(|a, b| b.count.cmp(&a.count));
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag",
                content_type
            );
        }
    }

    Ok(())
}
