//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Create a new post or draft from the scaffold
pub fn create_post(blog: &Blog, title: &str, layout: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    let target_dir = match layout {
        "draft" => blog.source_dir.join("_drafts"),
        _ => blog.source_dir.join("_posts"),
    };

    fs::create_dir_all(&target_dir)?;

    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let post_name = &blog.config.new_post_name;
        let slug = slug::slugify(title);

        post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = target_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Scaffold lookup, with a built-in fallback
    let scaffold_path = blog.base_dir.join("scaffolds").join(format!("{}.md", layout));
    let scaffold_content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n".to_string()
    };

    let content = scaffold_content
        .replace("{{ title }}", title)
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// Run the new command
pub fn run(blog: &Blog, title: &str, layout: Option<&str>) -> Result<()> {
    create_post(blog, title, layout.unwrap_or("post"), None)
}
